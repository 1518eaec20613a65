use crate::models::Coordinate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sentinel distance for a missing coordinate; fails every threshold check
pub const UNREACHABLE_KM: f64 = f64::MAX;

/// Great-circle distance in kilometers between two optional coordinates.
///
/// An absent coordinate yields [`UNREACHABLE_KM`] rather than an error, so
/// offers with unknown locations are never mistaken for nearby ones.
#[inline]
pub fn distance_km(a: Option<Coordinate>, b: Option<Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude),
        _ => UNREACHABLE_KM,
    }
}

/// Haversine distance between two lat/lon points in degrees, in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
