use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::event::EventCategory;

/// A host's post-event rating of one participating club.
///
/// Upsert-keyed by (event_category, event_id, host_user_id,
/// target_club_id): re-rating the same club for the same event replaces
/// the earlier row, so the aggregate always averages distinct
/// (host, club, event) triples.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubRating {
    pub id: String,
    pub event_category: EventCategory,
    pub event_id: String,
    pub host_user_id: String,
    pub target_club_id: String,
    /// 1–5.
    pub professionalism: i32,
    /// 1–5.
    pub reliability: i32,
    /// 1–5.
    pub collaboration_intent: i32,
    /// Mean of the three sub-scores.
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrefixedId for ClubRating {
    const PREFIX: &'static str = prefix::RATING;
}
