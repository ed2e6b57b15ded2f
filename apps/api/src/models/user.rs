use chrono::{DateTime, Utc};
use moyeora_common::id::{prefix, PrefixedId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role.
///
/// `superadmin` passes every authority gate in the workflow engine;
/// `admin` is a reserved tier that carries no extra authority in core
/// operations. Roles are elevated only out-of-band (startup bootstrap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn is_superadmin(self) -> bool {
        matches!(self, Role::Superadmin)
    }
}

/// Full user document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub birthday: String,
    pub school_name: String,
    pub school_id: String,
    pub role: Role,
    pub terms_agreed: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for User {
    const PREFIX: &'static str = prefix::USER;
}

/// Public-facing user response (no credential material).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub birthday: String,
    pub school_name: String,
    pub school_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            phone: u.phone,
            birthday: u.birthday,
            school_name: u.school_name,
            school_id: u.school_id,
            role: u.role,
            created_at: u.created_at,
        }
    }
}
