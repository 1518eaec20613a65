// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod scoring;

pub use distance::{distance_km, haversine_distance, UNREACHABLE_KM};
pub use filters::{check_compatibility, routes_within_range, time_diff_minutes, CompatibilityCheck};
pub use matcher::{MatchError, MatchOutcome, MatchingEngine, OfferSource};
pub use ranking::{rank_matches, MAX_RESULTS};
pub use scoring::{calculate_match_score, ScoreBreakdown};
