use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Collaborative event category.
///
/// The three categories are structurally identical, so they share one
/// collection with this tag rather than three parallel ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Contest,
    Forum,
    Research,
}

impl EventCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contest" => Some(Self::Contest),
            "forum" => Some(Self::Forum),
            "research" => Some(Self::Research),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contest => "contest",
            Self::Forum => "forum",
            Self::Research => "research",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collaborative event hosted by a user on behalf of their club.
///
/// Identity is immutable once created; the only mutation path is the
/// superadmin cascade delete.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub category: EventCategory,
    /// Hosting user.
    pub user_id: String,
    pub name: String,
    /// Free-text subtype within the category (e.g. "해커톤").
    pub event_type: String,
    pub date: DateTime<Utc>,
    pub place: String,
    pub description: String,
    /// Host contact published to applicants.
    pub contact: String,
    pub notices: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Event {
    const PREFIX: &'static str = prefix::EVENT;
}
