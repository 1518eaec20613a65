use crate::core::distance::distance_km;
use crate::models::{RideOffer, RideRequest};

/// Farthest a request's pickup may sit from an offer's start
pub const MAX_PICKUP_DISTANCE_KM: f64 = 5.0;
/// Farthest a request's dropoff may sit from an offer's end
pub const MAX_DROPOFF_DISTANCE_KM: f64 = 5.0;
/// Widest acceptable gap between desired and scheduled departure
pub const MAX_TIME_DIFF_MINUTES: i64 = 120;

/// Outcome of the hard compatibility gates.
///
/// Distances are reported even on failure so callers can explain why a
/// candidate was rejected. The time diff is absent when a distance gate
/// failed before the departure times were compared.
#[derive(Debug, Clone)]
pub struct CompatibilityCheck {
    pub pickup_distance_km: f64,
    pub dropoff_distance_km: f64,
    pub time_diff_minutes: Option<i64>,
    pub failure_reason: Option<&'static str>,
}

impl CompatibilityCheck {
    pub fn passed(&self) -> bool {
        self.failure_reason.is_none()
    }
}

/// Run the hard gates in order: route distance, time window, budget.
/// The first failing gate wins.
pub fn check_compatibility(request: &RideRequest, offer: &RideOffer) -> CompatibilityCheck {
    let pickup_distance_km = distance_km(request.pickup_location, offer.start_location);
    let dropoff_distance_km = distance_km(request.dropoff_location, offer.end_location);

    if !routes_within_range(pickup_distance_km, dropoff_distance_km) {
        return CompatibilityCheck {
            pickup_distance_km,
            dropoff_distance_km,
            time_diff_minutes: None,
            failure_reason: Some("Route too far apart"),
        };
    }

    let time_diff = time_diff_minutes(request.time_millis, offer.time_millis);
    if time_diff > MAX_TIME_DIFF_MINUTES {
        return CompatibilityCheck {
            pickup_distance_km,
            dropoff_distance_km,
            time_diff_minutes: Some(time_diff),
            failure_reason: Some("Time difference too large"),
        };
    }

    if request.max_budget > 0.0 && offer.price_per_seat > request.max_budget {
        return CompatibilityCheck {
            pickup_distance_km,
            dropoff_distance_km,
            time_diff_minutes: Some(time_diff),
            failure_reason: Some("Price exceeds budget"),
        };
    }

    CompatibilityCheck {
        pickup_distance_km,
        dropoff_distance_km,
        time_diff_minutes: Some(time_diff),
        failure_reason: None,
    }
}

/// Both route endpoints inside their thresholds (inclusive)
#[inline]
pub fn routes_within_range(pickup_km: f64, dropoff_km: f64) -> bool {
    pickup_km <= MAX_PICKUP_DISTANCE_KM && dropoff_km <= MAX_DROPOFF_DISTANCE_KM
}

/// Absolute departure gap in whole minutes (millisecond stamps, truncating division)
#[inline]
pub fn time_diff_minutes(a_millis: i64, b_millis: i64) -> i64 {
    (a_millis - b_millis).abs() / 60_000
}
