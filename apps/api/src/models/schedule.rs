use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::event::EventCategory;

/// Denormalized calendar projection of an event.
///
/// Two rows are written per event at creation time: one with
/// `is_public = true` (visible to everyone) and one with
/// `is_public = false` (the host's private mirror, which the reminder
/// scheduler scans). There is no update path; rows are only created with
/// the event and cascade-deleted with it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Schedule {
    pub id: String,
    pub event_category: EventCategory,
    pub event_id: String,
    /// Hosting user (on both the public and the private row).
    pub user_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub place: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Schedule {
    const PREFIX: &'static str = prefix::SCHEDULE;
}
