use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::event::EventCategory;

/// User-targeted message emitted by the workflow engine (`days_until = 0`)
/// or the reminder scheduler (`days_until` of 7, 3 or 1).
///
/// Only `is_read` ever changes after creation. The scheduler's idempotence
/// rests on the (user_id, event_id, days_until) existence check.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notification {
    pub id: String,
    /// Recipient.
    pub user_id: String,
    /// Absent for club-application notifications, which reference a club
    /// rather than an event.
    pub event_category: Option<EventCategory>,
    /// Event id, or club id for club-application notifications. Prefixes
    /// keep the two id spaces disjoint.
    pub event_id: String,
    /// Display title; workflow notifications carry a synthetic one
    /// (e.g. "김철수님이 참가 신청").
    pub event_name: String,
    pub event_date: Option<DateTime<Utc>>,
    /// 0 for workflow-status notifications; 7/3/1 for reminders.
    pub days_until: i64,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Notification {
    const PREFIX: &'static str = prefix::NOTIFICATION;
}
