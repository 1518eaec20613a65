use crate::core::{
    filters::check_compatibility,
    ranking::{rank_matches, MAX_RESULTS},
    scoring::calculate_match_score,
};
use crate::models::{RideMatch, RideOffer, RideRequest, ScoringWeights};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a match search
#[derive(Debug, Error)]
pub enum MatchError {
    /// The offer directory could not be queried at all. Distinct from an
    /// empty result: the rider is told to retry, not that nothing matched.
    #[error("failed to fetch ride offers: {0}")]
    PoolUnavailable(String),
}

/// Source of the open-offer candidate pool
#[async_trait]
pub trait OfferSource: Send + Sync {
    async fn open_offers(&self) -> Result<Vec<RideOffer>, MatchError>;
}

/// Result of a match search
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<RideMatch>,
    pub total_candidates: usize,
}

/// Ride-matching orchestrator
///
/// # Pipeline stages
/// 1. Exclude the rider's own offers
/// 2. Hard compatibility gates (route distance, time window, budget)
/// 3. Weighted scoring of survivors
/// 4. Zero-score drop, ranking, top-10 truncation
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    weights: ScoringWeights,
}

impl MatchingEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Gate and score a single candidate.
    ///
    /// Gate failures still produce a RideMatch: score 0.0 with the failing
    /// gate's reason attached, so the rejection stays explainable. The
    /// zero-score drop happens in [`find_matches`](Self::find_matches).
    pub fn score_candidate(&self, request: &RideRequest, offer: RideOffer) -> RideMatch {
        let check = check_compatibility(request, &offer);

        match check.failure_reason {
            Some(reason) => RideMatch {
                offer,
                match_score: 0.0,
                pickup_distance_km: check.pickup_distance_km,
                dropoff_distance_km: check.dropoff_distance_km,
                time_difference_minutes: check.time_diff_minutes,
                compatibility_reason: reason.to_string(),
            },
            None => {
                let time_diff = check.time_diff_minutes.unwrap_or(0);
                let breakdown = calculate_match_score(
                    request,
                    &offer,
                    check.pickup_distance_km,
                    check.dropoff_distance_km,
                    time_diff,
                    &self.weights,
                );

                RideMatch {
                    offer,
                    match_score: breakdown.total,
                    pickup_distance_km: check.pickup_distance_km,
                    dropoff_distance_km: check.dropoff_distance_km,
                    time_difference_minutes: Some(time_diff),
                    compatibility_reason: breakdown.reason,
                }
            }
        }
    }

    /// Run the full pipeline over an already-fetched candidate pool.
    ///
    /// Pure and synchronous: one pass, no candidate's outcome depends on
    /// another's, safe to call concurrently for different requests.
    pub fn find_matches(&self, request: &RideRequest, candidates: Vec<RideOffer>) -> MatchOutcome {
        let total_candidates = candidates.len();

        let scored: Vec<RideMatch> = candidates
            .into_iter()
            // Stage 1: never match a rider against their own offer
            .filter(|offer| offer.owner_uid != request.owner_uid)
            // Stages 2 & 3: gate, then score survivors
            .map(|offer| self.score_candidate(request, offer))
            // Stage 4a: drop gate failures and pathological zero scores
            .filter(|m| m.match_score > 0.0)
            .collect();

        MatchOutcome {
            matches: rank_matches(scored, MAX_RESULTS),
            total_candidates,
        }
    }

    /// Fetch the open-offer pool from `source` and run the pipeline.
    ///
    /// The fetch is the only await point; dropping the returned future
    /// cancels the search before any result is produced.
    pub async fn find_matches_for_request<S>(
        &self,
        request: &RideRequest,
        source: &S,
    ) -> Result<MatchOutcome, MatchError>
    where
        S: OfferSource + ?Sized,
    {
        let candidates = source.open_offers().await?;

        tracing::debug!(
            "Fetched {} open offers for request {}",
            candidates.len(),
            request.id
        );

        Ok(self.find_matches(request, candidates))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
