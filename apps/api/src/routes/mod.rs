pub mod auth;
pub mod club_applications;
pub mod clubs;
pub mod cron;
pub mod events;
pub mod health;
pub mod notifications;
pub mod participants;
pub mod ratings;
pub mod schedules;
pub mod users;

use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api",
        auth::router()
            .merge(users::router())
            .merge(clubs::router())
            .merge(club_applications::router())
            .merge(events::router())
            .merge(participants::router())
            .merge(ratings::router())
            .merge(schedules::router())
            .merge(notifications::router())
            .merge(cron::router()),
    )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health,
        // Auth
        auth::login,
        auth::logout,
        // Users
        users::create_user,
        users::get_me,
        users::delete_user,
        // Clubs
        clubs::create_club,
        clubs::list_clubs,
        clubs::get_club,
        clubs::update_club,
        clubs::list_members,
        // Club applications
        club_applications::create_application,
        club_applications::list_applications,
        club_applications::update_application,
        // Events
        events::create_event,
        events::list_events,
        events::get_event,
        events::delete_event,
        // Participation
        participants::create_participation,
        participants::list_participants,
        participants::list_my_participations,
        participants::update_participation,
        // Ratings
        ratings::list_rating_targets,
        ratings::submit_rating,
        // Schedules
        schedules::list_public_schedules,
        schedules::list_my_schedules,
        // Notifications
        notifications::list_notifications,
        notifications::mark_read,
        // Cron
        cron::run_tick,
    ),
    components(
        schemas(
            // Error types
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            // Models
            crate::models::user::UserResponse,
            crate::models::user::Role,
            crate::models::club::Club,
            crate::models::club_member::ClubMember,
            crate::models::club_member::ClubRole,
            crate::models::club_application::ClubApplication,
            crate::models::event::Event,
            crate::models::event::EventCategory,
            crate::models::participant::Participant,
            crate::models::schedule::Schedule,
            crate::models::notification::Notification,
            crate::models::rating::ClubRating,
            crate::models::status::ReviewStatus,
            // Route request/response types
            health::HealthResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            users::CreateUserRequest,
            clubs::CreateClubRequest,
            clubs::UpdateClubRequest,
            club_applications::CreateApplicationRequest,
            club_applications::UpdateApplicationRequest,
            events::CreateEventRequest,
            participants::CreateParticipationRequest,
            participants::UpdateParticipationRequest,
            ratings::RatingTarget,
            ratings::SubmitRatingRequest,
            ratings::RatingResponse,
            cron::CronTickResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Auth", description = "Sessions"),
        (name = "Users", description = "Accounts"),
        (name = "Clubs", description = "Club registry"),
        (name = "Club Applications", description = "Club join workflow"),
        (name = "Events", description = "Collaborative events"),
        (name = "Participation", description = "Event participation workflow"),
        (name = "Ratings", description = "Club ratings and trust scores"),
        (name = "Schedules", description = "Calendar projections"),
        (name = "Notifications", description = "User notifications"),
        (name = "Cron", description = "Scheduled jobs"),
    )
)]
pub struct ApiDoc;
