use chrono::{DateTime, Utc};
use serde::Serialize;

/// Server-side session, keyed by its opaque bearer token (`ses_…`).
///
/// Expired sessions are treated as absent on lookup; the store may reap
/// them eagerly.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
