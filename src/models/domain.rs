use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees, mirroring the store's geo-point shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Lifecycle status of a ride offer; transitions are owned by the app, not this service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Open,
    Full,
    Closed,
}

/// Music preference on either side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MusicPreference {
    Yes,
    No,
    #[default]
    NoPreference,
}

impl MusicPreference {
    /// True when the side actually stated a preference
    pub fn is_specified(&self) -> bool {
        !matches!(self, MusicPreference::NoPreference)
    }
}

/// Conversation preference on either side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationLevel {
    Chatty,
    Quiet,
    #[default]
    NoPreference,
}

impl ConversationLevel {
    pub fn is_specified(&self) -> bool {
        !matches!(self, ConversationLevel::NoPreference)
    }
}

/// Ride offer posted by a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideOffer {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "ownerUid", default)]
    pub owner_uid: String,
    #[serde(alias = "from")]
    pub origin: String,
    #[serde(alias = "to")]
    pub destination: String,
    #[serde(rename = "timeMillis")]
    pub time_millis: i64,
    #[serde(default)]
    pub seats: u32,
    #[serde(rename = "pricePerSeat", default)]
    pub price_per_seat: f64,
    #[serde(rename = "allowsSmoking", default)]
    pub allows_smoking: bool,
    #[serde(rename = "allowsPets", default)]
    pub allows_pets: bool,
    #[serde(rename = "musicPreference", default)]
    pub music_preference: MusicPreference,
    #[serde(rename = "conversationLevel", default)]
    pub conversation_level: ConversationLevel,
    #[serde(default)]
    pub status: OfferStatus,
    #[serde(rename = "startLocation", default)]
    pub start_location: Option<Coordinate>,
    #[serde(rename = "endLocation", default)]
    pub end_location: Option<Coordinate>,
    #[serde(rename = "driverRating", default = "default_driver_rating")]
    pub driver_rating: f64,
}

fn default_driver_rating() -> f64 {
    5.0
}

/// Ride request posted by a rider; the query subject of a match search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideRequest {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "ownerUid", default)]
    pub owner_uid: String,
    #[serde(alias = "from")]
    pub origin: String,
    #[serde(alias = "to")]
    pub destination: String,
    #[serde(rename = "timeMillis")]
    pub time_millis: i64,
    #[serde(default)]
    pub seats: u32,
    #[serde(rename = "maxBudget", default)]
    pub max_budget: f64,
    #[serde(rename = "needsNonSmoking", default)]
    pub needs_non_smoking: bool,
    #[serde(rename = "needsNoPets", default)]
    pub needs_no_pets: bool,
    #[serde(rename = "musicPreference", default)]
    pub music_preference: MusicPreference,
    #[serde(rename = "conversationLevel", default)]
    pub conversation_level: ConversationLevel,
    #[serde(rename = "pickupLocation", default)]
    pub pickup_location: Option<Coordinate>,
    #[serde(rename = "dropoffLocation", default)]
    pub dropoff_location: Option<Coordinate>,
}

/// Scored candidate produced fresh for each search; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideMatch {
    pub offer: RideOffer,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "pickupDistanceKm")]
    pub pickup_distance_km: f64,
    #[serde(rename = "dropoffDistanceKm")]
    pub dropoff_distance_km: f64,
    /// Absolute departure-time difference in whole minutes; absent when a
    /// distance gate failed before the times were compared
    #[serde(rename = "timeDifferenceMinutes")]
    pub time_difference_minutes: Option<i64>,
    #[serde(rename = "compatibilityReason")]
    pub compatibility_reason: String,
}

/// Scoring weights; must sum to 100 for totals to stay in [0, 100]
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub distance: f64,
    pub time: f64,
    pub price: f64,
    pub preferences: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 35.0,
            time: 30.0,
            price: 20.0,
            preferences: 15.0,
        }
    }
}
