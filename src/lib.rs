//! RideNest Algo - Ride-matching service for the CampusRideNest carpool app
//!
//! This library provides the ride-matching engine used by CampusRideNest.
//! Given a rider's request and the pool of open driver offers it filters
//! incompatible candidates, scores the rest across four weighted dimensions,
//! and returns a ranked, capped list of matches.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::haversine_distance, MatchError, MatchOutcome, MatchingEngine, OfferSource,
};
pub use crate::models::{
    Coordinate, FindMatchesRequest, FindMatchesResponse, RideMatch, RideOffer, RideRequest,
    ScoringWeights,
};
