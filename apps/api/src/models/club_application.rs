use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::status::ReviewStatus;

/// A user's request to join a club.
///
/// At most one `pending` application exists per (club_id, user_id); the
/// workflow checks this before inserting.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubApplication {
    pub id: String,
    pub club_id: String,
    pub user_id: String,
    pub message: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for ClubApplication {
    const PREFIX: &'static str = prefix::CLUB_APPLICATION;
}
