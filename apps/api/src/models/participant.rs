use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::event::EventCategory;
use crate::models::status::ReviewStatus;

/// A user's application to participate in a specific event.
///
/// At most one row exists per (user_id, event_category, event_id); the
/// store enforces the uniqueness index.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Participant {
    pub id: String,
    pub event_category: EventCategory,
    pub event_id: String,
    /// Applicant.
    pub user_id: String,
    /// Resolved club reference when the applicant applies on behalf of a
    /// registered club. Rating eligibility matches on this, never on the
    /// display name.
    pub club_id: Option<String>,
    /// Display snapshot of the club's name at submission time, or free
    /// text for unaffiliated applicants.
    pub club_name: Option<String>,
    pub message: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Participant {
    const PREFIX: &'static str = prefix::PARTICIPANT;
}
