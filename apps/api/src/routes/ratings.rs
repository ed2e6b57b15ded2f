//! Post-event club ratings and trust-score recomputation.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::models::club::Club;
use crate::models::rating::ClubRating;
use crate::models::status::ReviewStatus;
use crate::permissions;
use crate::routes::events::parse_category;
use crate::trust;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/events/{event_type}/{id}/ratings",
        get(list_rating_targets).post(submit_rating),
    )
}

// ---------------------------------------------------------------------------
// GET /api/events/:event_type/:id/ratings
// ---------------------------------------------------------------------------

/// One approved participating club, with whether the caller already rated
/// it for this event.
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingTarget {
    pub club_id: String,
    pub club_name: String,
    pub trust_score: i32,
    pub already_rated: bool,
}

#[utoipa::path(
    get,
    path = "/api/events/{event_type}/{id}/ratings",
    tag = "Ratings",
    security(("bearer" = [])),
    params(
        ("event_type" = String, Path, description = "contest | forum | research"),
        ("id" = String, Path, description = "Event ID"),
    ),
    responses(
        (status = 200, description = "Rateable clubs for this event", body = Vec<RatingTarget>),
        (status = 400, description = "Unknown event type", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the event host", body = ApiErrorBody),
        (status = 404, description = "Event not found", body = ApiErrorBody),
    ),
)]
pub async fn list_rating_targets(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_type, id)): Path<(String, String)>,
) -> Result<Json<Vec<RatingTarget>>, ApiError> {
    let category = parse_category(&event_type)?;
    let store = state.store.as_ref();

    let event = permissions::require_event_host(store, category, &id, &auth).await?;

    let participants = store
        .list_participants_for_event(category, &event.id)
        .await?;

    // One entry per distinct approved club; unaffiliated (free-text)
    // participants carry no club reference and cannot be rated.
    let mut targets: Vec<RatingTarget> = Vec::new();
    for participant in participants {
        if participant.status != ReviewStatus::Approved {
            continue;
        }
        let Some(club_id) = participant.club_id else {
            continue;
        };
        if targets.iter().any(|t| t.club_id == club_id) {
            continue;
        }
        // Clubs deleted since approval are skipped.
        let Some(club) = store.find_club(&club_id).await? else {
            continue;
        };
        let already_rated = store
            .find_club_rating(category, &event.id, &auth.user_id, &club.id)
            .await?
            .is_some();

        targets.push(RatingTarget {
            club_id: club.id,
            club_name: club.name,
            trust_score: club.trust_score,
            already_rated,
        });
    }

    Ok(Json(targets))
}

// ---------------------------------------------------------------------------
// POST /api/events/:event_type/:id/ratings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRatingRequest {
    pub target_club_id: String,
    /// 1–5.
    pub professionalism: i32,
    /// 1–5.
    pub reliability: i32,
    /// 1–5.
    pub collaboration_intent: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub rating: ClubRating,
    /// Target club with its recomputed trust score.
    pub club: Club,
}

#[utoipa::path(
    post,
    path = "/api/events/{event_type}/{id}/ratings",
    tag = "Ratings",
    security(("bearer" = [])),
    params(
        ("event_type" = String, Path, description = "contest | forum | research"),
        ("id" = String, Path, description = "Event ID"),
    ),
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating upserted, trust score recomputed", body = RatingResponse),
        (status = 400, description = "Event not over, club not eligible, or bad scores", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the event host", body = ApiErrorBody),
        (status = 404, description = "Event or club not found", body = ApiErrorBody),
    ),
)]
pub async fn submit_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_type, id)): Path<(String, String)>,
    Json(body): Json<SubmitRatingRequest>,
) -> Result<Json<RatingResponse>, ApiError> {
    let category = parse_category(&event_type)?;
    let store = state.store.as_ref();

    let event = permissions::require_event_host(store, category, &id, &auth).await?;

    // Temporal gate: rate only after the event ends.
    if event.date > Utc::now() {
        return Err(ApiError::precondition("Event has not ended yet"));
    }

    // Eligibility gate: the target must be an approved participant club.
    let participants = store
        .list_participants_for_event(category, &event.id)
        .await?;
    let eligible = participants.iter().any(|p| {
        p.status == ReviewStatus::Approved
            && p.club_id.as_deref() == Some(body.target_club_id.as_str())
    });
    if !eligible {
        return Err(ApiError::precondition(
            "Club has no approved participation for this event",
        ));
    }

    let mut errors: Vec<FieldError> = Vec::new();
    for (field, value) in [
        ("professionalism", body.professionalism),
        ("reliability", body.reliability),
        ("collaboration_intent", body.collaboration_intent),
    ] {
        if !(trust::RATING_MIN..=trust::RATING_MAX).contains(&value) {
            errors.push(FieldError {
                field: field.into(),
                message: format!("{field} must be between 1 and 5"),
            });
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let now = Utc::now();
    let rating = store
        .upsert_club_rating(ClubRating {
            id: ClubRating::generate(),
            event_category: category,
            event_id: event.id.clone(),
            host_user_id: auth.user_id.clone(),
            target_club_id: body.target_club_id.clone(),
            professionalism: body.professionalism,
            reliability: body.reliability,
            collaboration_intent: body.collaboration_intent,
            score: trust::rating_score(
                body.professionalism,
                body.reliability,
                body.collaboration_intent,
            ),
            created_at: now,
            updated_at: now,
        })
        .await?;

    // Recompute the club's aggregate over every rating it has received.
    let ratings = store.list_ratings_for_club(&body.target_club_id).await?;
    let (trust_score, trust_count) =
        trust::aggregate_trust(&ratings).unwrap_or((crate::models::club::DEFAULT_TRUST_SCORE, 0));

    let club = store
        .set_club_trust(&body.target_club_id, trust_score, trust_count)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    tracing::info!(
        event_id = %event.id,
        club_id = %club.id,
        trust_score = club.trust_score,
        trust_count = club.trust_count,
        "rating submitted"
    );

    Ok(Json(RatingResponse { rating, club }))
}
