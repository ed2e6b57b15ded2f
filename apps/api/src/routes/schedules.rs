//! Calendar views over the schedule projections.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::models::schedule::Schedule;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedules", get(list_public_schedules))
        .route("/schedules/@me", get(list_my_schedules))
}

// ---------------------------------------------------------------------------
// GET /api/schedules
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "Schedules",
    responses(
        (status = 200, description = "Public calendar, event date ascending", body = Vec<Schedule>),
    ),
)]
pub async fn list_public_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let schedules = state.store.list_public_schedules().await?;
    Ok(Json(schedules))
}

// ---------------------------------------------------------------------------
// GET /api/schedules/@me
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/schedules/@me",
    tag = "Schedules",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's private calendar", body = Vec<Schedule>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn list_my_schedules(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let schedules = state.store.list_schedules_for_user(&user_id).await?;
    Ok(Json(schedules))
}
