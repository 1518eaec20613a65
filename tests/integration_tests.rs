// Integration tests for RideNest Algo

use async_trait::async_trait;
use ridenest_algo::core::{MatchError, OfferSource, MAX_RESULTS};
use ridenest_algo::models::{ConversationLevel, MusicPreference};
use ridenest_algo::{Coordinate, MatchingEngine, RideOffer, RideRequest};

fn create_test_request() -> RideRequest {
    RideRequest {
        id: "req-1".to_string(),
        owner_uid: "rider-1".to_string(),
        origin: "Hub".to_string(),
        destination: "Harrisburg".to_string(),
        time_millis: 1_700_000_000_000,
        seats: 1,
        max_budget: 20.0,
        needs_non_smoking: false,
        needs_no_pets: false,
        music_preference: MusicPreference::NoPreference,
        conversation_level: ConversationLevel::NoPreference,
        pickup_location: Some(Coordinate::new(40.7967, -77.8617)),
        dropoff_location: Some(Coordinate::new(40.2737, -76.8844)),
    }
}

fn create_test_offer(id: &str, owner_uid: &str) -> RideOffer {
    RideOffer {
        id: id.to_string(),
        owner_uid: owner_uid.to_string(),
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
fn test_integration_end_to_end_matching() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    let mut far_offer = create_test_offer("4", "driver-4");
    far_offer.start_location = Some(Coordinate::new(40.4406, -79.9959)); // Pittsburgh

    let mut late_offer = create_test_offer("5", "driver-5");
    late_offer.time_millis += 200 * 60_000; // Beyond the 2h window

    let mut pricey_offer = create_test_offer("6", "driver-6");
    pricey_offer.price_per_seat = 45.0; // Over the rider's budget

    let mut slower_offer = create_test_offer("2", "driver-2");
    slower_offer.time_millis += 60 * 60_000;

    let candidates = vec![
        create_test_offer("1", "driver-1"), // Near-perfect match
        slower_offer,                       // Good but worse timing
        create_test_offer("3", "rider-1"),  // The rider's own offer
        far_offer,                          // Route too far apart
        late_offer,                         // Time difference too large
        pricey_offer,                       // Price exceeds budget
    ];

    let outcome = engine.find_matches(&request, candidates);

    assert_eq!(outcome.total_candidates, 6);
    assert_eq!(outcome.matches.len(), 2);

    // Self-owned and gate-failed candidates never appear
    for m in &outcome.matches {
        assert_ne!(m.offer.owner_uid, request.owner_uid);
        assert!(m.match_score > 0.0);
    }

    // Sorted by descending score
    for pair in outcome.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    assert_eq!(outcome.matches[0].offer.id, "1");
}

#[test]
fn test_perfect_match_scenario() {
    let engine = MatchingEngine::with_default_weights();
    let mut request = create_test_request();
    request.max_budget = 0.0; // Unconstrained

    let m = engine.score_candidate(&request, create_test_offer("perfect", "driver-1"));

    assert_eq!(m.match_score, 100.0);
    assert!(m.pickup_distance_km < 0.01);
    assert!(m.dropoff_distance_km < 0.01);
    assert_eq!(m.time_difference_minutes, Some(0));
    assert_eq!(
        m.compatibility_reason,
        "Very close route • Perfect timing • Great price • Matching preferences"
    );
}

#[test]
fn test_results_never_exceed_cap() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    let candidates: Vec<RideOffer> = (0..30)
        .map(|i| create_test_offer(&format!("offer-{}", i), &format!("driver-{}", i)))
        .collect();

    let outcome = engine.find_matches(&request, candidates);
    assert_eq!(outcome.matches.len(), MAX_RESULTS);
    assert_eq!(outcome.total_candidates, 30);
}

#[test]
fn test_equal_scores_preserve_discovery_order() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    // Identical offers score identically; discovery order must survive
    let candidates: Vec<RideOffer> = (0..5)
        .map(|i| create_test_offer(&format!("offer-{}", i), &format!("driver-{}", i)))
        .collect();

    let outcome = engine.find_matches(&request, candidates);
    let ids: Vec<String> = outcome.matches.iter().map(|m| m.offer.id.clone()).collect();
    assert_eq!(ids, vec!["offer-0", "offer-1", "offer-2", "offer-3", "offer-4"]);
}

#[test]
fn test_matching_is_deterministic() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    let candidates: Vec<RideOffer> = (0..8)
        .map(|i| {
            let mut offer = create_test_offer(&format!("offer-{}", i), &format!("driver-{}", i));
            offer.time_millis += (i as i64) * 13 * 60_000;
            offer.price_per_seat = 8.0 + i as f64;
            offer
        })
        .collect();

    let first = engine.find_matches(&request, candidates.clone());
    let second = engine.find_matches(&request, candidates);

    assert_eq!(first.matches.len(), second.matches.len());
    for (a, b) in first.matches.iter().zip(second.matches.iter()) {
        assert_eq!(a.offer.id, b.offer.id);
        assert_eq!(a.match_score, b.match_score);
        assert_eq!(a.compatibility_reason, b.compatibility_reason);
    }
}

struct StaticPool(Vec<RideOffer>);

#[async_trait]
impl OfferSource for StaticPool {
    async fn open_offers(&self) -> Result<Vec<RideOffer>, MatchError> {
        Ok(self.0.clone())
    }
}

struct OfflinePool;

#[async_trait]
impl OfferSource for OfflinePool {
    async fn open_offers(&self) -> Result<Vec<RideOffer>, MatchError> {
        Err(MatchError::PoolUnavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_pool_failure_distinct_from_no_matches() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    // A dead offer directory is an error the rider can retry
    let result = engine.find_matches_for_request(&request, &OfflinePool).await;
    assert!(matches!(result, Err(MatchError::PoolUnavailable(_))));

    // An empty directory is a successful search with nothing compatible
    let outcome = engine
        .find_matches_for_request(&request, &StaticPool(Vec::new()))
        .await
        .expect("empty pool should not be an error");
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.total_candidates, 0);
}

#[tokio::test]
async fn test_async_search_matches_sync_pipeline() {
    let engine = MatchingEngine::with_default_weights();
    let request = create_test_request();

    let pool = StaticPool(vec![
        create_test_offer("a", "driver-1"),
        create_test_offer("b", "rider-1"),
    ]);

    let outcome = engine
        .find_matches_for_request(&request, &pool)
        .await
        .expect("static pool should succeed");

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].offer.id, "a");
    assert_eq!(outcome.total_candidates, 2);
}
