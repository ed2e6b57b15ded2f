use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Membership role within a club. The creator becomes `chief`; approved
/// applicants become `member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClubRole {
    Chief,
    Member,
}

/// Join document between a user and a club.
///
/// At most one row exists per (club_id, user_id); the store enforces the
/// uniqueness index.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubMember {
    pub id: String,
    pub club_id: String,
    pub user_id: String,
    pub role: ClubRole,
    /// Inherited from the club on approval.
    pub school_id: String,
    pub joined_at: DateTime<Utc>,
}

impl PrefixedId for ClubMember {
    const PREFIX: &'static str = prefix::CLUB_MEMBER;
}
