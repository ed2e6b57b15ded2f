//! Trust-score aggregation.
//!
//! Each rating stores the mean of its three 1–5 sub-scores; a club's
//! displayed trust value is the mean of all its rating scores renormalized
//! to 0–100. Clubs with no ratings keep
//! [`DEFAULT_TRUST_SCORE`](crate::models::club::DEFAULT_TRUST_SCORE).

use crate::models::rating::ClubRating;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// Mean of the three sub-scores, persisted on the rating row.
pub fn rating_score(professionalism: i32, reliability: i32, collaboration_intent: i32) -> f64 {
    f64::from(professionalism + reliability + collaboration_intent) / 3.0
}

/// Fold every rating of a club into its `(trust_score, trust_count)` pair.
///
/// `trust_score = round(mean(scores) / 5 * 100)`. Returns `None` for an
/// empty slice so callers leave the default in place.
pub fn aggregate_trust(ratings: &[ClubRating]) -> Option<(i32, i32)> {
    if ratings.is_empty() {
        return None;
    }
    let total: f64 = ratings.iter().map(|r| r.score).sum();
    let average = total / ratings.len() as f64;
    let trust_score = (average / 5.0 * 100.0).round() as i32;
    Some((trust_score, ratings.len() as i32))
}
