use crate::models::RideMatch;
use std::cmp::Ordering;

/// Hard cap on a match search's result list
pub const MAX_RESULTS: usize = 10;

/// Sort matches by descending score and cap the list.
/// The sort is stable, so equal scores keep their discovery order.
pub fn rank_matches(mut matches: Vec<RideMatch>, limit: usize) -> Vec<RideMatch> {
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    matches.truncate(limit);
    matches
}
