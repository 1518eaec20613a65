use crate::core::filters::{MAX_PICKUP_DISTANCE_KM, MAX_TIME_DIFF_MINUTES};
use crate::models::{RideOffer, RideRequest, ScoringWeights};

/// Average route distance at or below this earns the full distance score
const IDEAL_DISTANCE_KM: f64 = 1.0;
/// Departure gap at or below this earns the full time score
const IDEAL_TIME_DIFF_MINUTES: i64 = 30;

/// Per-dimension scores and the weighted total for one candidate
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub distance_score: f64,
    pub time_score: f64,
    pub price_score: f64,
    pub preference_score: f64,
    pub reason: String,
}

/// Score a candidate that already passed the compatibility gates.
///
/// Each dimension lands in [0, 100]; the weighted total stays in [0, 100]
/// as long as the weights sum to 100.
pub fn calculate_match_score(
    request: &RideRequest,
    offer: &RideOffer,
    pickup_distance_km: f64,
    dropoff_distance_km: f64,
    time_diff_minutes: i64,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let distance_score = calculate_distance_score(pickup_distance_km, dropoff_distance_km);
    let time_score = calculate_time_score(time_diff_minutes);
    let price_score = calculate_price_score(request.max_budget, offer.price_per_seat);
    let preference_score = calculate_preference_score(request, offer);

    let total = (distance_score * weights.distance
        + time_score * weights.time
        + price_score * weights.price
        + preference_score * weights.preferences)
        / 100.0;

    let reason = generate_compatibility_reason(
        distance_score,
        time_score,
        price_score,
        preference_score,
    );

    ScoreBreakdown {
        total,
        distance_score,
        time_score,
        price_score,
        preference_score,
        reason,
    }
}

/// Average of pickup and dropoff distance, decaying linearly from the ideal
/// radius down to zero at the route threshold
#[inline]
fn calculate_distance_score(pickup_km: f64, dropoff_km: f64) -> f64 {
    let avg_distance = (pickup_km + dropoff_km) / 2.0;

    if avg_distance <= IDEAL_DISTANCE_KM {
        100.0
    } else if avg_distance >= MAX_PICKUP_DISTANCE_KM {
        0.0
    } else {
        100.0 * (1.0 - (avg_distance - IDEAL_DISTANCE_KM) / (MAX_PICKUP_DISTANCE_KM - IDEAL_DISTANCE_KM))
    }
}

/// Linear decay from the ideal departure gap down to zero at the window edge
#[inline]
fn calculate_time_score(time_diff_minutes: i64) -> f64 {
    if time_diff_minutes <= IDEAL_TIME_DIFF_MINUTES {
        100.0
    } else if time_diff_minutes >= MAX_TIME_DIFF_MINUTES {
        0.0
    } else {
        100.0
            * (1.0
                - (time_diff_minutes - IDEAL_TIME_DIFF_MINUTES) as f64
                    / (MAX_TIME_DIFF_MINUTES - IDEAL_TIME_DIFF_MINUTES) as f64)
    }
}

/// Tiered price fit: great deal under 70% of budget, fair within budget
#[inline]
fn calculate_price_score(max_budget: f64, price_per_seat: f64) -> f64 {
    if max_budget <= 0.0 {
        return 100.0; // No budget constraint
    }

    if price_per_seat <= max_budget * 0.7 {
        100.0
    } else if price_per_seat <= max_budget {
        70.0
    } else {
        // The budget gate already rejects this case
        0.0
    }
}

/// Ratio of satisfied preference checks to applicable ones.
///
/// Smoking and pets always apply; music and conversation only count when
/// both sides stated a preference.
#[inline]
fn calculate_preference_score(request: &RideRequest, offer: &RideOffer) -> f64 {
    let mut matches = 0u32;
    let mut total = 0u32;

    total += 1;
    if !request.needs_non_smoking || !offer.allows_smoking {
        matches += 1;
    }

    total += 1;
    if !request.needs_no_pets || !offer.allows_pets {
        matches += 1;
    }

    if request.music_preference.is_specified() && offer.music_preference.is_specified() {
        total += 1;
        if request.music_preference == offer.music_preference {
            matches += 1;
        }
    }

    if request.conversation_level.is_specified() && offer.conversation_level.is_specified() {
        total += 1;
        if request.conversation_level == offer.conversation_level {
            matches += 1;
        }
    }

    if total > 0 {
        100.0 * matches as f64 / total as f64
    } else {
        100.0
    }
}

/// Assemble the rider-facing explanation from the dimension scores.
/// Phrase selection and ordering are part of the response contract.
fn generate_compatibility_reason(
    distance_score: f64,
    time_score: f64,
    price_score: f64,
    preference_score: f64,
) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if distance_score >= 80.0 {
        reasons.push("Very close route");
    } else if distance_score >= 60.0 {
        reasons.push("Nearby route");
    }

    if time_score >= 80.0 {
        reasons.push("Perfect timing");
    } else if time_score >= 60.0 {
        reasons.push("Good timing");
    }

    if price_score >= 90.0 {
        reasons.push("Great price");
    } else if price_score >= 70.0 {
        reasons.push("Fair price");
    }

    if preference_score >= 75.0 {
        reasons.push("Matching preferences");
    }

    if reasons.is_empty() {
        return "Compatible match".to_string();
    }

    reasons.join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationLevel, Coordinate, MusicPreference};

    fn test_request() -> RideRequest {
        RideRequest {
            id: "req-1".to_string(),
            owner_uid: "rider-1".to_string(),
            origin: "Hub".to_string(),
            destination: "Harrisburg".to_string(),
            time_millis: 1_700_000_000_000,
            seats: 1,
            max_budget: 0.0,
            needs_non_smoking: false,
            needs_no_pets: false,
            music_preference: MusicPreference::NoPreference,
            conversation_level: ConversationLevel::NoPreference,
            pickup_location: Some(Coordinate::new(40.7967, -77.8617)),
            dropoff_location: Some(Coordinate::new(40.2737, -76.8844)),
        }
    }

    fn test_offer() -> RideOffer {
        RideOffer {
            id: "offer-1".to_string(),
            owner_uid: "driver-1".to_string(),
            origin: "Hub".to_string(),
            destination: "Harrisburg".to_string(),
            time_millis: 1_700_000_000_000,
            seats: 3,
            price_per_seat: 10.0,
            allows_smoking: false,
            allows_pets: false,
            music_preference: MusicPreference::NoPreference,
            conversation_level: ConversationLevel::NoPreference,
            status: Default::default(),
            start_location: Some(Coordinate::new(40.7967, -77.8617)),
            end_location: Some(Coordinate::new(40.2737, -76.8844)),
            driver_rating: 5.0,
        }
    }

    #[test]
    fn test_perfect_match_scores_hundred() {
        let breakdown = calculate_match_score(&test_request(), &test_offer(), 0.0, 0.0, 0, &ScoringWeights::default());

        assert_eq!(breakdown.distance_score, 100.0);
        assert_eq!(breakdown.time_score, 100.0);
        assert_eq!(breakdown.price_score, 100.0);
        assert_eq!(breakdown.preference_score, 100.0);
        assert_eq!(breakdown.total, 100.0);
        assert_eq!(
            breakdown.reason,
            "Very close route • Perfect timing • Great price • Matching preferences"
        );
    }

    #[test]
    fn test_distance_score_interpolates() {
        // 3km average sits midway between the 1km ideal and the 5km edge
        assert_eq!(calculate_distance_score(3.0, 3.0), 50.0);
        assert_eq!(calculate_distance_score(1.0, 1.0), 100.0);
        assert_eq!(calculate_distance_score(0.5, 1.5), 100.0);
        assert_eq!(calculate_distance_score(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_time_score_interpolates() {
        let score = calculate_time_score(75);
        assert!((score - 50.0).abs() < 0.01, "Expected ~50, got {}", score);
        assert_eq!(calculate_time_score(30), 100.0);
        assert_eq!(calculate_time_score(120), 0.0);
    }

    #[test]
    fn test_price_score_tiers() {
        // 16 misses the 0.7 * 20 = 14 great-deal tier but stays within budget
        assert_eq!(calculate_price_score(20.0, 16.0), 70.0);
        assert_eq!(calculate_price_score(20.0, 14.0), 100.0);
        assert_eq!(calculate_price_score(20.0, 25.0), 0.0);
        assert_eq!(calculate_price_score(0.0, 25.0), 100.0);
    }

    #[test]
    fn test_preference_score_counts_applicable_checks() {
        let mut request = test_request();
        let mut offer = test_offer();

        // Only smoking and pets apply, both satisfied
        assert_eq!(calculate_preference_score(&request, &offer), 100.0);

        // Smoking clash: rider needs smoke-free, driver allows smoking
        request.needs_non_smoking = true;
        offer.allows_smoking = true;
        assert_eq!(calculate_preference_score(&request, &offer), 50.0);

        // Music becomes applicable and disagrees: 1 of 3
        request.music_preference = MusicPreference::Yes;
        offer.music_preference = MusicPreference::No;
        let score = calculate_preference_score(&request, &offer);
        assert!((score - 100.0 / 3.0).abs() < 0.01);

        // Conversation applicable and agrees: 2 of 4
        request.conversation_level = ConversationLevel::Quiet;
        offer.conversation_level = ConversationLevel::Quiet;
        assert_eq!(calculate_preference_score(&request, &offer), 50.0);
    }

    #[test]
    fn test_one_sided_preference_not_counted() {
        let mut request = test_request();
        request.music_preference = MusicPreference::Yes;
        // Offer stays no-preference, so the music check never applies
        assert_eq!(calculate_preference_score(&request, &test_offer()), 100.0);
    }

    #[test]
    fn test_reason_phrase_tiers() {
        assert_eq!(
            generate_compatibility_reason(65.0, 65.0, 70.0, 50.0),
            "Nearby route • Good timing • Fair price"
        );
        assert_eq!(generate_compatibility_reason(25.0, 33.0, 0.0, 50.0), "Compatible match");
        assert_eq!(generate_compatibility_reason(80.0, 50.0, 50.0, 75.0), "Very close route • Matching preferences");
    }

    #[test]
    fn test_total_is_weighted_combination() {
        let mut request = test_request();
        request.max_budget = 20.0;
        let mut offer = test_offer();
        offer.price_per_seat = 16.0;

        // distance 50, time ~50, price 70, preferences 100
        let breakdown = calculate_match_score(&request, &offer, 3.0, 3.0, 75, &ScoringWeights::default());
        let expected = (50.0 * 35.0 + breakdown.time_score * 30.0 + 70.0 * 20.0 + 100.0 * 15.0) / 100.0;
        assert!((breakdown.total - expected).abs() < 1e-9);
        assert!(breakdown.total >= 0.0 && breakdown.total <= 100.0);
    }
}
