use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::Serialize;
use utoipa::ToSchema;

/// Trust score assigned to a club before it has received any ratings.
pub const DEFAULT_TRUST_SCORE: i32 = 70;

/// Club document.
///
/// `trust_score` (0–100) and `trust_count` are owned by the trust-score
/// aggregation engine and rewritten whenever a rating lands.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Club {
    pub id: String,
    /// Creating user; holds exclusive write authority together with
    /// chief-role members.
    pub user_id: String,
    /// Inherited from the creator at creation time.
    pub school_id: String,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub contact: String,
    pub trust_score: i32,
    pub trust_count: i32,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Club {
    const PREFIX: &'static str = prefix::CLUB;
}

/// Partial profile update applied by the owner or a chief member.
/// `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct UpdateClub {
    pub theme: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
}
