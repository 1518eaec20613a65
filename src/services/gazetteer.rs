use crate::models::{Coordinate, RideRequest};

/// Penn State main campus; the resolution of last resort
const CAMPUS_CENTER: Coordinate = Coordinate {
    latitude: 40.7982,
    longitude: -77.8599,
};

/// Immutable lookup of well-known campus locations and nearby cities.
///
/// The app geocodes free-text addresses when posts are created, but older
/// documents and geocoder outages leave coordinates missing. This table
/// resolves those labels so such requests can still be matched. Built once
/// at startup and passed where needed; entries are checked in insertion
/// order, exact hits before substring hits.
pub struct CampusGazetteer {
    entries: Vec<(String, Coordinate)>,
    default_coordinate: Coordinate,
}

impl CampusGazetteer {
    pub fn new(entries: Vec<(String, Coordinate)>, default_coordinate: Coordinate) -> Self {
        Self {
            entries,
            default_coordinate,
        }
    }

    /// The standard Penn State table used in production
    pub fn campus_default() -> Self {
        let entry = |label: &str, lat: f64, lon: f64| (label.to_string(), Coordinate::new(lat, lon));

        Self::new(
            vec![
                // Penn State locations
                entry("penn state", 40.7982, -77.8599),
                entry("penn state university", 40.7982, -77.8599),
                entry("hub", 40.7967, -77.8617),
                entry("pattee library", 40.7994, -77.8611),
                entry("beaver stadium", 40.8122, -77.8563),
                // Common PA cities
                entry("harrisburg", 40.2737, -76.8844),
                entry("harrisburg pa", 40.2737, -76.8844),
                entry("philadelphia", 39.9526, -75.1652),
                entry("philadelphia pa", 39.9526, -75.1652),
                entry("pittsburgh", 40.4406, -79.9959),
                entry("pittsburgh pa", 40.4406, -79.9959),
                // Campus buildings
                entry("main building", 40.7985, -77.8600),
                entry("library", 40.7994, -77.8611),
                entry("gym", 40.8020, -77.8570),
                entry("cafe", 40.7970, -77.8620),
                entry("ormsby hall", 40.7975, -77.8590),
                entry("sage hall", 40.7980, -77.8595),
                entry("campus facility", 40.7990, -77.8610),
                entry("scott hall", 40.7965, -77.8585),
                entry("mall", 40.7950, -77.8630),
            ],
            CAMPUS_CENTER,
        )
    }

    /// Resolve a free-text label to a coordinate, falling back to the
    /// campus center when nothing matches
    pub fn resolve(&self, label: &str) -> Coordinate {
        let normalized = label.to_lowercase();
        let normalized = normalized.trim();

        if normalized.is_empty() {
            return self.default_coordinate;
        }

        if let Some((_, coord)) = self.entries.iter().find(|(key, _)| key == normalized) {
            return *coord;
        }

        if let Some((_, coord)) = self
            .entries
            .iter()
            .find(|(key, _)| normalized.contains(key.as_str()) || key.contains(normalized))
        {
            return *coord;
        }

        self.default_coordinate
    }

    /// Fill in any missing coordinates on a fetched ride request from its
    /// origin/destination labels
    pub fn backfill_request(&self, request: &mut RideRequest) {
        if request.pickup_location.is_none() {
            let resolved = self.resolve(&request.origin);
            tracing::debug!(
                "Backfilled pickup for request {}: {:?} -> ({}, {})",
                request.id,
                request.origin,
                resolved.latitude,
                resolved.longitude
            );
            request.pickup_location = Some(resolved);
        }

        if request.dropoff_location.is_none() {
            let resolved = self.resolve(&request.destination);
            tracing::debug!(
                "Backfilled dropoff for request {}: {:?} -> ({}, {})",
                request.id,
                request.destination,
                resolved.latitude,
                resolved.longitude
            );
            request.dropoff_location = Some(resolved);
        }
    }
}

impl Default for CampusGazetteer {
    fn default() -> Self {
        Self::campus_default()
    }
}
