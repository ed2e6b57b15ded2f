use chrono::{Duration, Utc};
use rand::Rng;

use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::session::Session;

/// Generate an opaque random token with the given prefix and byte length.
pub fn generate_opaque_token(prefix: &str, bytes: usize) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill(&mut buf[..]);
    format!("{}_{}", prefix, URL_SAFE_NO_PAD.encode(&buf))
}

/// Generate a session token (opaque, `ses_` prefix).
pub fn generate_session_token() -> String {
    generate_opaque_token("ses", 32)
}

/// Mint and persist a session for the user.
pub async fn create_session(
    store: &dyn Store,
    user_id: &str,
    ttl_days: i64,
) -> Result<Session, ApiError> {
    let now = Utc::now();
    let session = Session {
        token: generate_session_token(),
        user_id: user_id.to_string(),
        created_at: now,
        expires_at: now + Duration::days(ttl_days),
    };
    store.insert_session(session.clone()).await?;
    Ok(session)
}
