//! Event participation workflow: apply, host review queue, own
//! applications, approve/reject.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::models::participant::Participant;
use crate::models::status::ReviewStatus;
use crate::notify;
use crate::permissions;
use crate::routes::events::parse_category;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/participate",
            post(create_participation).get(list_participants),
        )
        .route("/participate/@me", get(list_my_participations))
        .route("/participate/{id}", patch(update_participation))
}

// ---------------------------------------------------------------------------
// POST /api/participate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParticipationRequest {
    /// One of `contest`, `forum`, `research`.
    pub event_type: String,
    pub event_id: String,
    /// Registered club to apply on behalf of; its name is snapshotted.
    pub club_id: Option<String>,
    /// Free-text club name for unaffiliated applicants; ignored when
    /// `club_id` is given.
    pub club_name: Option<String>,
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/participate",
    tag = "Participation",
    security(("bearer" = [])),
    request_body = CreateParticipationRequest,
    responses(
        (status = 201, description = "Participation submitted", body = Participant),
        (status = 400, description = "Unknown event type or already applied", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 404, description = "Event or club not found", body = ApiErrorBody),
    ),
)]
pub async fn create_participation(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateParticipationRequest>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let category = parse_category(&body.event_type)?;
    let store = state.store.as_ref();

    let event = store
        .find_event(category, &body.event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    if store
        .find_participant_for_event(category, &event.id, &user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::duplicate("Already applied to this event"));
    }

    // Resolve the club reference; eligibility checks later match on the
    // id, the name is only a display snapshot.
    let (club_id, club_name) = match body.club_id {
        Some(club_id) => {
            let club = store
                .find_club(&club_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Club not found"))?;
            (Some(club.id), Some(club.name))
        }
        None => (None, body.club_name),
    };

    let participant = store
        .insert_participant(Participant {
            id: Participant::generate(),
            event_category: category,
            event_id: event.id.clone(),
            user_id: user_id.clone(),
            club_id,
            club_name,
            message: body.message,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        })
        .await?;

    let applicant = store
        .find_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    notify::participation_applied(store, &event, &applicant.name).await?;

    tracing::info!(
        participant_id = %participant.id,
        event_id = %event.id,
        user_id = %user_id,
        "participation submitted"
    );

    Ok((StatusCode::CREATED, Json(participant)))
}

// ---------------------------------------------------------------------------
// GET /api/participate?event_type=…&event_id=…
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListParticipantsQuery {
    pub event_type: String,
    pub event_id: String,
}

#[utoipa::path(
    get,
    path = "/api/participate",
    tag = "Participation",
    security(("bearer" = [])),
    params(
        ("event_type" = String, Query, description = "contest | forum | research"),
        ("event_id" = String, Query, description = "Event ID"),
    ),
    responses(
        (status = 200, description = "Participants in submission order", body = Vec<Participant>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the event host", body = ApiErrorBody),
        (status = 404, description = "Event not found", body = ApiErrorBody),
    ),
)]
pub async fn list_participants(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListParticipantsQuery>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    let category = parse_category(&query.event_type)?;

    permissions::require_event_host(state.store.as_ref(), category, &query.event_id, &auth)
        .await?;

    let participants = state
        .store
        .list_participants_for_event(category, &query.event_id)
        .await?;
    Ok(Json(participants))
}

// ---------------------------------------------------------------------------
// GET /api/participate/@me
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/participate/@me",
    tag = "Participation",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's participations, newest first", body = Vec<Participant>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn list_my_participations(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    let participants = state.store.list_participations_for_user(&user_id).await?;
    Ok(Json(participants))
}

// ---------------------------------------------------------------------------
// PATCH /api/participate/:id
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateParticipationRequest {
    pub status: String,
}

#[utoipa::path(
    patch,
    path = "/api/participate/{id}",
    tag = "Participation",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Participant ID"),
    ),
    request_body = UpdateParticipationRequest,
    responses(
        (status = 200, description = "Updated participation", body = Participant),
        (status = 400, description = "Invalid status", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the event host", body = ApiErrorBody),
        (status = 404, description = "Participation not found", body = ApiErrorBody),
    ),
)]
pub async fn update_participation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateParticipationRequest>,
) -> Result<Json<Participant>, ApiError> {
    let status = ReviewStatus::parse(&body.status)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let store = state.store.as_ref();

    let participant = store
        .find_participant(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Participation not found"))?;

    let event = permissions::require_event_host(
        store,
        participant.event_category,
        &participant.event_id,
        &auth,
    )
    .await?;

    // Transitions are deliberately unconstrained: re-approving or
    // revoking an approval is allowed.
    let participant = store
        .set_participant_status(&id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Participation not found"))?;

    notify::participation_decided(store, &event, &participant.user_id, status).await?;

    tracing::info!(
        participant_id = %participant.id,
        event_id = %event.id,
        status = status.as_str(),
        decided_by = %auth.user_id,
        "participation reviewed"
    );

    Ok(Json(participant))
}
