//! Club registry: creation, discovery, profile edits, member list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::models::club::{Club, UpdateClub, DEFAULT_TRUST_SCORE};
use crate::models::club_member::{ClubMember, ClubRole};
use crate::permissions;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/club", post(create_club).get(list_clubs))
        .route("/club/{id}", get(get_club).patch(update_club))
        .route("/club/{id}/members", get(list_members))
}

// ---------------------------------------------------------------------------
// POST /api/club
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClubRequest {
    pub name: String,
    pub theme: String,
    pub description: String,
    pub contact: String,
}

#[utoipa::path(
    post,
    path = "/api/club",
    tag = "Clubs",
    security(("bearer" = [])),
    request_body = CreateClubRequest,
    responses(
        (status = 201, description = "Club created", body = Club),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn create_club(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<Club>), ApiError> {
    // --- Validation ---
    let mut errors: Vec<FieldError> = Vec::new();

    let name = body.name.trim().to_string();
    if name.is_empty() {
        errors.push(FieldError {
            field: "name".into(),
            message: "Club name is required".into(),
        });
    } else if name.len() > 100 {
        errors.push(FieldError {
            field: "name".into(),
            message: "Club name must be 100 characters or fewer".into(),
        });
    }

    let theme = body.theme.trim().to_string();
    if theme.is_empty() {
        errors.push(FieldError {
            field: "theme".into(),
            message: "Theme is required".into(),
        });
    }

    let description = body.description.trim().to_string();
    if description.is_empty() {
        errors.push(FieldError {
            field: "description".into(),
            message: "Description is required".into(),
        });
    }

    let contact = body.contact.trim().to_string();
    if contact.is_empty() {
        errors.push(FieldError {
            field: "contact".into(),
            message: "Contact is required".into(),
        });
    }

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    // The club inherits its school from the creator.
    let creator = state
        .store
        .find_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let now = Utc::now();
    let club = state
        .store
        .insert_club(Club {
            id: Club::generate(),
            user_id: user_id.clone(),
            school_id: creator.school_id,
            name,
            theme,
            description,
            contact,
            trust_score: DEFAULT_TRUST_SCORE,
            trust_count: 0,
            created_at: now,
        })
        .await?;

    // The creator joins their own club as chief.
    state
        .store
        .insert_club_member_if_absent(ClubMember {
            id: ClubMember::generate(),
            club_id: club.id.clone(),
            user_id,
            role: ClubRole::Chief,
            school_id: club.school_id.clone(),
            joined_at: now,
        })
        .await?;

    tracing::info!(club_id = %club.id, user_id = %club.user_id, "club created");

    Ok((StatusCode::CREATED, Json(club)))
}

// ---------------------------------------------------------------------------
// GET /api/club
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListClubsQuery {
    pub school_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/club",
    tag = "Clubs",
    params(
        ("school_id" = Option<String>, Query, description = "Restrict to one school"),
    ),
    responses(
        (status = 200, description = "Clubs, newest first", body = Vec<Club>),
    ),
)]
pub async fn list_clubs(
    State(state): State<AppState>,
    Query(query): Query<ListClubsQuery>,
) -> Result<Json<Vec<Club>>, ApiError> {
    let clubs = state.store.list_clubs(query.school_id.as_deref()).await?;
    Ok(Json(clubs))
}

// ---------------------------------------------------------------------------
// GET /api/club/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/club/{id}",
    tag = "Clubs",
    params(
        ("id" = String, Path, description = "Club ID"),
    ),
    responses(
        (status = 200, description = "Club detail", body = Club),
        (status = 404, description = "Club not found", body = ApiErrorBody),
    ),
)]
pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Club>, ApiError> {
    let club = state
        .store
        .find_club(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    Ok(Json(club))
}

// ---------------------------------------------------------------------------
// PATCH /api/club/:id
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateClubRequest {
    pub theme: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/club/{id}",
    tag = "Clubs",
    security(("bearer" = [])),
    params(
        ("id" = String, Path, description = "Club ID"),
    ),
    request_body = UpdateClubRequest,
    responses(
        (status = 200, description = "Updated club", body = Club),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Not the owner or a chief", body = ApiErrorBody),
        (status = 404, description = "Club not found", body = ApiErrorBody),
    ),
)]
pub async fn update_club(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateClubRequest>,
) -> Result<Json<Club>, ApiError> {
    permissions::require_club_authority(state.store.as_ref(), &id, &auth).await?;

    // Provided fields must not be blank.
    let mut errors: Vec<FieldError> = Vec::new();
    for (field, value) in [
        ("theme", &body.theme),
        ("description", &body.description),
        ("contact", &body.contact),
    ] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(FieldError {
                    field: field.into(),
                    message: format!("{field} cannot be empty"),
                });
            }
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let club = state
        .store
        .update_club(
            &id,
            UpdateClub {
                theme: body.theme.map(|v| v.trim().to_string()),
                description: body.description.map(|v| v.trim().to_string()),
                contact: body.contact.map(|v| v.trim().to_string()),
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    Ok(Json(club))
}

// ---------------------------------------------------------------------------
// GET /api/club/:id/members
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/club/{id}/members",
    tag = "Clubs",
    params(
        ("id" = String, Path, description = "Club ID"),
    ),
    responses(
        (status = 200, description = "Members in join order", body = Vec<ClubMember>),
        (status = 404, description = "Club not found", body = ApiErrorBody),
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ClubMember>>, ApiError> {
    state
        .store
        .find_club(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    let members = state.store.list_club_members(&id).await?;
    Ok(Json(members))
}
