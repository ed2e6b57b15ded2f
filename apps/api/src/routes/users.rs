//! User accounts: signup, own profile, admin cascade delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::auth::password::hash_password;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::models::user::{Role, User, UserResponse};
use crate::permissions;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me))
        .route("/users/{user_id}", delete(delete_user))
}

// ---------------------------------------------------------------------------
// POST /api/users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub birthday: String,
    pub school_name: String,
    pub school_id: String,
    #[serde(default)]
    pub terms_agreed: bool,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed or email taken", body = ApiErrorBody),
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    // --- Validation ---
    let mut errors: Vec<FieldError> = Vec::new();

    let email = body.email.trim().to_lowercase();
    if !email.contains('@') || email.len() < 3 {
        errors.push(FieldError {
            field: "email".into(),
            message: "Invalid email address".into(),
        });
    }

    if body.password.len() < 8 {
        errors.push(FieldError {
            field: "password".into(),
            message: "Password must be at least 8 characters".into(),
        });
    }

    let name = body.name.trim().to_string();
    if name.is_empty() || name.len() > 64 {
        errors.push(FieldError {
            field: "name".into(),
            message: "Name must be 1–64 characters".into(),
        });
    }

    let phone = body.phone.trim().to_string();
    if phone.is_empty() {
        errors.push(FieldError {
            field: "phone".into(),
            message: "Phone number is required".into(),
        });
    }

    let birthday = body.birthday.trim().to_string();
    if birthday.is_empty() {
        errors.push(FieldError {
            field: "birthday".into(),
            message: "Birthday is required".into(),
        });
    }

    let school_name = body.school_name.trim().to_string();
    if school_name.is_empty() {
        errors.push(FieldError {
            field: "school_name".into(),
            message: "School name is required".into(),
        });
    }

    let school_id = body.school_id.trim().to_string();
    if school_id.is_empty() {
        errors.push(FieldError {
            field: "school_id".into(),
            message: "School id is required".into(),
        });
    }

    if !body.terms_agreed {
        errors.push(FieldError {
            field: "terms_agreed".into(),
            message: "You must agree to the terms of service".into(),
        });
    }

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let password_hash = hash_password(&body.password)?;

    let user = state
        .store
        .insert_user(User {
            id: User::generate(),
            email,
            password_hash,
            name,
            phone,
            birthday,
            school_name,
            school_id,
            role: Role::User,
            terms_agreed: true,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ---------------------------------------------------------------------------
// GET /api/users/@me
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/users/@me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user's profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn get_me(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .find_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

// ---------------------------------------------------------------------------
// DELETE /api/users/:user_id
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "Users",
    security(("bearer" = [])),
    params(
        ("user_id" = String, Path, description = "User ID"),
    ),
    responses(
        (status = 204, description = "User and owned documents deleted"),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Caller is not a superadmin, or target is one", body = ApiErrorBody),
        (status = 404, description = "User not found", body = ApiErrorBody),
    ),
)]
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    permissions::require_superadmin(&auth)?;

    let target = state
        .store
        .find_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if target.role.is_superadmin() {
        return Err(ApiError::forbidden("Cannot delete a superadmin account"));
    }

    let store = state.store.as_ref();

    // Hosted events take their schedule and participant rows with them.
    for event in store.list_events_hosted_by(&target.id).await? {
        store
            .delete_schedules_for_event(event.category, &event.id)
            .await?;
        store
            .delete_participants_for_event(event.category, &event.id)
            .await?;
        store.delete_event(event.category, &event.id).await?;
    }

    // Owned clubs take their membership and application rows with them.
    for club in store.list_clubs_owned_by(&target.id).await? {
        store.delete_club_members_for_club(&club.id).await?;
        store.delete_club_applications_for_club(&club.id).await?;
        store.delete_club(&club.id).await?;
    }

    store.delete_participants_for_user(&target.id).await?;
    store.delete_schedules_for_user(&target.id).await?;
    store.delete_notifications_for_user(&target.id).await?;
    store.delete_club_members_for_user(&target.id).await?;
    store.delete_club_applications_for_user(&target.id).await?;
    store.delete_sessions_for_user(&target.id).await?;
    store.delete_user(&target.id).await?;

    tracing::info!(user_id = %target.id, deleted_by = %auth.user_id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}
