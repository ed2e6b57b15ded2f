use crate::auth::middleware::AuthUser;
use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::club::Club;
use crate::models::club_member::ClubRole;
use crate::models::event::{Event, EventCategory};

/// Gate for the moderation surface. The plain `admin` role deliberately
/// grants nothing here.
pub fn require_superadmin(auth: &AuthUser) -> Result<(), ApiError> {
    if auth.role.is_superadmin() {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "You do not have permission to perform this action",
        ))
    }
}

/// Resolve the event and check the caller hosts it (superadmins bypass).
///
/// A missing event is a 404 before any authority check, so callers can't
/// probe for event existence through 403s.
pub async fn require_event_host(
    store: &dyn Store,
    category: EventCategory,
    event_id: &str,
    auth: &AuthUser,
) -> Result<Event, ApiError> {
    let event = store
        .find_event(category, event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    if event.user_id == auth.user_id || auth.role.is_superadmin() {
        Ok(event)
    } else {
        Err(ApiError::forbidden("Only the event host can do this"))
    }
}

/// Resolve the club and check the caller runs it: the creator, a chief
/// member, or a superadmin.
pub async fn require_club_authority(
    store: &dyn Store,
    club_id: &str,
    auth: &AuthUser,
) -> Result<Club, ApiError> {
    let club = store
        .find_club(club_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    if club.user_id == auth.user_id || auth.role.is_superadmin() {
        return Ok(club);
    }

    let is_chief = store
        .find_club_member(club_id, &auth.user_id)
        .await?
        .is_some_and(|m| m.role == ClubRole::Chief);

    if is_chief {
        Ok(club)
    } else {
        Err(ApiError::forbidden("Only the club chief can do this"))
    }
}
