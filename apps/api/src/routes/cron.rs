//! External trigger for the reminder scheduler.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody};
use crate::scheduler;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/cron/notifications", post(run_tick))
}

// ---------------------------------------------------------------------------
// POST /api/cron/notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct CronTickResponse {
    /// Reminder notifications created by this tick.
    pub created: u64,
}

#[utoipa::path(
    post,
    path = "/api/cron/notifications",
    tag = "Cron",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Tick complete", body = CronTickResponse),
        (status = 401, description = "Missing or wrong cron secret", body = ApiErrorBody),
    ),
)]
pub async fn run_tick(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CronTickResponse>, ApiError> {
    // The invoker authenticates with the shared cron secret, not a session.
    let secret = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if secret != Some(state.config.cron_secret.as_str()) {
        return Err(ApiError::unauthorized("Invalid cron secret"));
    }

    let created = scheduler::run_reminder_tick(state.store.as_ref(), Utc::now()).await?;

    Ok(Json(CronTickResponse { created }))
}
