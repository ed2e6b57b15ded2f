//! Collaborative events: creation (with calendar projections), discovery,
//! admin cascade delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::models::event::{Event, EventCategory};
use crate::models::schedule::Schedule;
use crate::permissions;
use crate::AppState;
use moyeora_common::id::PrefixedId;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/collab", post(create_event).get(list_events))
        .route(
            "/collab/{event_type}/{id}",
            get(get_event).delete(delete_event),
        )
}

/// Map a path/body event-type string onto a category.
pub(crate) fn parse_category(event_type: &str) -> Result<EventCategory, ApiError> {
    EventCategory::parse(event_type).ok_or_else(|| ApiError::bad_request("Unknown event type"))
}

// ---------------------------------------------------------------------------
// POST /api/collab
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// One of `contest`, `forum`, `research`.
    pub category: String,
    pub name: String,
    pub event_type: String,
    /// RFC 3339 timestamp.
    pub date: String,
    pub place: String,
    pub description: String,
    pub contact: String,
    #[serde(default)]
    pub notices: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/collab",
    tag = "Events",
    security(("bearer" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn create_event(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    // --- Validation ---
    let mut errors: Vec<FieldError> = Vec::new();

    let category = EventCategory::parse(body.category.trim());
    if category.is_none() {
        errors.push(FieldError {
            field: "category".into(),
            message: "Category must be one of contest, forum, research".into(),
        });
    }

    let name = body.name.trim().to_string();
    if name.is_empty() {
        errors.push(FieldError {
            field: "name".into(),
            message: "Event name is required".into(),
        });
    }

    let event_type = body.event_type.trim().to_string();
    if event_type.is_empty() {
        errors.push(FieldError {
            field: "event_type".into(),
            message: "Event type is required".into(),
        });
    }

    let date = DateTime::parse_from_rfc3339(body.date.trim()).map(|d| d.with_timezone(&Utc));
    if date.is_err() {
        errors.push(FieldError {
            field: "date".into(),
            message: "Date must be an RFC 3339 timestamp".into(),
        });
    }

    let place = body.place.trim().to_string();
    if place.is_empty() {
        errors.push(FieldError {
            field: "place".into(),
            message: "Place is required".into(),
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

    let (Some(category), Ok(date)) = (category, date) else {
        return Err(ApiError::validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let now = Utc::now();
    let event = state
        .store
        .insert_event(Event {
            id: Event::generate(),
            category,
            user_id: user_id.clone(),
            name,
            event_type,
            date,
            place,
            description,
            contact,
            notices: body.notices,
            created_at: now,
        })
        .await?;

    // Calendar projections: one public row, one private mirror for the
    // host (the reminder scheduler scans the private one).
    for is_public in [true, false] {
        state
            .store
            .insert_schedule(Schedule {
                id: Schedule::generate(),
                event_category: event.category,
                event_id: event.id.clone(),
                user_id: user_id.clone(),
                name: event.name.clone(),
                date: event.date,
                place: event.place.clone(),
                is_public,
                created_at: now,
            })
            .await?;
    }

    tracing::info!(
        event_id = %event.id,
        category = %event.category,
        user_id = %event.user_id,
        "event created"
    );

    Ok((StatusCode::CREATED, Json(event)))
}

// ---------------------------------------------------------------------------
// GET /api/collab
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/collab",
    tag = "Events",
    responses(
        (status = 200, description = "All events, event date descending", body = Vec<Event>),
    ),
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.store.list_events().await?;
    Ok(Json(events))
}

// ---------------------------------------------------------------------------
// GET /api/collab/:event_type/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/collab/{event_type}/{id}",
    tag = "Events",
    params(
        ("event_type" = String, Path, description = "contest | forum | research"),
        ("id" = String, Path, description = "Event ID"),
    ),
    responses(
        (status = 200, description = "Event detail", body = Event),
        (status = 400, description = "Unknown event type", body = ApiErrorBody),
        (status = 404, description = "Event not found", body = ApiErrorBody),
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path((event_type, id)): Path<(String, String)>,
) -> Result<Json<Event>, ApiError> {
    let category = parse_category(&event_type)?;

    let event = state
        .store
        .find_event(category, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// DELETE /api/collab/:event_type/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/collab/{event_type}/{id}",
    tag = "Events",
    security(("bearer" = [])),
    params(
        ("event_type" = String, Path, description = "contest | forum | research"),
        ("id" = String, Path, description = "Event ID"),
    ),
    responses(
        (status = 204, description = "Event, schedules and participants deleted"),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 403, description = "Caller is not a superadmin", body = ApiErrorBody),
        (status = 404, description = "Event not found", body = ApiErrorBody),
    ),
)]
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((event_type, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    permissions::require_superadmin(&auth)?;
    let category = parse_category(&event_type)?;

    let store = state.store.as_ref();

    store
        .find_event(category, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    store.delete_schedules_for_event(category, &id).await?;
    store.delete_participants_for_event(category, &id).await?;
    store.delete_event(category, &id).await?;

    tracing::info!(event_id = %id, deleted_by = %auth.user_id, "event deleted");

    Ok(StatusCode::NO_CONTENT)
}
