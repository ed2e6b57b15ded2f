//! Club join workflow: apply, review queue, approve/reject.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::models::club_application::ClubApplication;
use crate::models::club_member::{ClubMember, ClubRole};
use crate::models::status::ReviewStatus;
use crate::notify;
use crate::permissions;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/club/application",
            post(create_application).get(list_applications),
        )
        .route("/club/application/{id}", patch(update_application))
}

// ---------------------------------------------------------------------------
// POST /api/club/application
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateApplicationRequest {
    pub club_id: String,
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/club/application",
    tag = "Club Applications",
    security(("bearer" = [])),
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ClubApplication),
        (status = 400, description = "Already a member or already pending", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 404, description = "Club not found", body = ApiErrorBody),
    ),
)]
pub async fn create_application(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ClubApplication>), ApiError> {
    let store = state.store.as_ref();

    let club = store
        .find_club(&body.club_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    if store.find_club_member(&club.id, &user_id).await?.is_some() {
        return Err(ApiError::duplicate("Already a member of this club"));
    }

    if store
        .find_pending_club_application(&club.id, &user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::duplicate("Application already pending"));
    }

    let application = store
        .insert_club_application(ClubApplication {
            id: ClubApplication::generate(),
            club_id: club.id.clone(),
            user_id: user_id.clone(),
            message: body.message,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        })
        .await?;

    let applicant = store
        .find_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    notify::club_application_received(store, &club, &applicant.name).await?;

    tracing::info!(
        application_id = %application.id,
        club_id = %club.id,
        user_id = %user_id,
        "club application submitted"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

// ---------------------------------------------------------------------------
// GET /api/club/application?club_id=…
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub club_id: String,
}

#[utoipa::path(
    get,
    path = "/api/club/application",
    tag = "Club Applications",
    security(("bearer" = [])),
    params(
        ("club_id" = String, Query, description = "Club ID"),
    ),
    responses(
        (status = 200, description = "Applications in submission order", body = Vec<ClubApplication>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the owner or a chief", body = ApiErrorBody),
        (status = 404, description = "Club not found", body = ApiErrorBody),
    ),
)]
pub async fn list_applications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<ClubApplication>>, ApiError> {
    permissions::require_club_authority(state.store.as_ref(), &query.club_id, &auth).await?;

    let applications = state.store.list_club_applications(&query.club_id).await?;
    Ok(Json(applications))
}

// ---------------------------------------------------------------------------
// PATCH /api/club/application/:id
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationRequest {
    pub status: String,
}

#[utoipa::path(
    patch,
    path = "/api/club/application/{id}",
    tag = "Club Applications",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Application ID"),
    ),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Updated application", body = ClubApplication),
        (status = 400, description = "Invalid status", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the owner or a chief", body = ApiErrorBody),
        (status = 404, description = "Application not found", body = ApiErrorBody),
    ),
)]
pub async fn update_application(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateApplicationRequest>,
) -> Result<Json<ClubApplication>, ApiError> {
    let status = ReviewStatus::parse(&body.status)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let store = state.store.as_ref();

    let application = store
        .find_club_application(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    let club = permissions::require_club_authority(store, &application.club_id, &auth).await?;

    let application = store
        .set_club_application_status(&id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    // Approval promotes the applicant to member; re-approval is a no-op.
    if status == ReviewStatus::Approved {
        store
            .insert_club_member_if_absent(ClubMember {
                id: ClubMember::generate(),
                club_id: club.id.clone(),
                user_id: application.user_id.clone(),
                role: ClubRole::Member,
                school_id: club.school_id.clone(),
                joined_at: Utc::now(),
            })
            .await?;
    }

    notify::club_application_decided(store, &club, &application.user_id, status).await?;

    tracing::info!(
        application_id = %application.id,
        club_id = %club.id,
        status = status.as_str(),
        decided_by = %auth.user_id,
        "club application reviewed"
    );

    Ok(Json(application))
}
