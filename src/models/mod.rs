// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ConversationLevel, Coordinate, MusicPreference, OfferStatus, RideMatch, RideOffer,
    RideRequest, ScoringWeights,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
