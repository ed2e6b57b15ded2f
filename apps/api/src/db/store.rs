use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::club::{Club, UpdateClub};
use crate::models::club_application::ClubApplication;
use crate::models::club_member::ClubMember;
use crate::models::event::{Event, EventCategory};
use crate::models::notification::Notification;
use crate::models::participant::Participant;
use crate::models::rating::ClubRating;
use crate::models::schedule::Schedule;
use crate::models::session::Session;
use crate::models::status::ReviewStatus;
use crate::models::user::{Role, User};

/// Per-collection create/find/update/delete contract over the document
/// store.
///
/// The real database is an external collaborator; the engines only ever
/// consume this contract. Backed by [`MemoryStore`](crate::db::memory::MemoryStore)
/// in-process and in tests; a production driver slots in behind the same
/// trait.
///
/// Every call is an independent atomic round trip. Multi-document
/// sequences (approve-then-notify, upsert-rating-then-recompute-trust)
/// are deliberately not transactional; the uniqueness indexes noted per
/// method are the only cross-request guarantees.
#[async_trait]
pub trait Store: Send + Sync {
    // -----------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------

    /// Unique index: `email`. Fails with `DUPLICATE` when taken.
    async fn insert_user(&self, user: User) -> Result<User, ApiError>;
    async fn find_user(&self, id: &str) -> Result<Option<User>, ApiError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Out-of-band role elevation (startup bootstrap); no request path calls this.
    async fn set_user_role(&self, id: &str, role: Role) -> Result<Option<User>, ApiError>;
    async fn delete_user(&self, id: &str) -> Result<bool, ApiError>;

    // -----------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------

    async fn insert_session(&self, session: Session) -> Result<(), ApiError>;
    /// Expired sessions are reported as absent.
    async fn find_session(&self, token: &str) -> Result<Option<Session>, ApiError>;
    async fn delete_session(&self, token: &str) -> Result<(), ApiError>;
    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Clubs
    // -----------------------------------------------------------------

    async fn insert_club(&self, club: Club) -> Result<Club, ApiError>;
    async fn find_club(&self, id: &str) -> Result<Option<Club>, ApiError>;
    /// Newest first; optionally filtered to one school.
    async fn list_clubs(&self, school_id: Option<&str>) -> Result<Vec<Club>, ApiError>;
    async fn list_clubs_owned_by(&self, user_id: &str) -> Result<Vec<Club>, ApiError>;
    async fn update_club(&self, id: &str, update: UpdateClub) -> Result<Option<Club>, ApiError>;
    /// Single targeted write issued by the trust-score aggregation engine.
    async fn set_club_trust(
        &self,
        id: &str,
        trust_score: i32,
        trust_count: i32,
    ) -> Result<Option<Club>, ApiError>;
    async fn delete_club(&self, id: &str) -> Result<bool, ApiError>;

    // -----------------------------------------------------------------
    // Club members
    // -----------------------------------------------------------------

    /// Unique index: (club_id, user_id). Returns the existing row when one
    /// is already present, which makes approval idempotent under races.
    async fn insert_club_member_if_absent(
        &self,
        member: ClubMember,
    ) -> Result<ClubMember, ApiError>;
    async fn find_club_member(
        &self,
        club_id: &str,
        user_id: &str,
    ) -> Result<Option<ClubMember>, ApiError>;
    /// Join order (oldest first).
    async fn list_club_members(&self, club_id: &str) -> Result<Vec<ClubMember>, ApiError>;
    async fn delete_club_members_for_club(&self, club_id: &str) -> Result<u64, ApiError>;
    async fn delete_club_members_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Club applications
    // -----------------------------------------------------------------

    async fn insert_club_application(
        &self,
        application: ClubApplication,
    ) -> Result<ClubApplication, ApiError>;
    async fn find_club_application(&self, id: &str)
        -> Result<Option<ClubApplication>, ApiError>;
    async fn find_pending_club_application(
        &self,
        club_id: &str,
        user_id: &str,
    ) -> Result<Option<ClubApplication>, ApiError>;
    /// Submission order (oldest first).
    async fn list_club_applications(
        &self,
        club_id: &str,
    ) -> Result<Vec<ClubApplication>, ApiError>;
    async fn set_club_application_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<Option<ClubApplication>, ApiError>;
    async fn delete_club_applications_for_club(&self, club_id: &str) -> Result<u64, ApiError>;
    async fn delete_club_applications_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------

    async fn insert_event(&self, event: Event) -> Result<Event, ApiError>;
    async fn find_event(
        &self,
        category: EventCategory,
        id: &str,
    ) -> Result<Option<Event>, ApiError>;
    /// All categories merged, event date descending.
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;
    async fn list_events_hosted_by(&self, user_id: &str) -> Result<Vec<Event>, ApiError>;
    async fn delete_event(&self, category: EventCategory, id: &str) -> Result<bool, ApiError>;

    // -----------------------------------------------------------------
    // Schedules
    // -----------------------------------------------------------------

    async fn insert_schedule(&self, schedule: Schedule) -> Result<Schedule, ApiError>;
    /// Public rows only, event date ascending.
    async fn list_public_schedules(&self) -> Result<Vec<Schedule>, ApiError>;
    /// The user's private mirror rows, event date ascending.
    async fn list_schedules_for_user(&self, user_id: &str) -> Result<Vec<Schedule>, ApiError>;
    /// Private rows with `date` in `[start, end)`, as scanned by the scheduler.
    async fn list_private_schedules_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Schedule>, ApiError>;
    async fn delete_schedules_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<u64, ApiError>;
    async fn delete_schedules_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Participants
    // -----------------------------------------------------------------

    /// Unique index: (user_id, event_category, event_id). Fails with
    /// `DUPLICATE` when the applicant already has a row for the event.
    async fn insert_participant(&self, participant: Participant)
        -> Result<Participant, ApiError>;
    async fn find_participant(&self, id: &str) -> Result<Option<Participant>, ApiError>;
    async fn find_participant_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>, ApiError>;
    /// Submission order (oldest first).
    async fn list_participants_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<Vec<Participant>, ApiError>;
    async fn list_participations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Participant>, ApiError>;
    async fn set_participant_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<Option<Participant>, ApiError>;
    async fn delete_participants_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<u64, ApiError>;
    async fn delete_participants_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------

    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, ApiError>;
    /// Existence check backing the scheduler's idempotence.
    async fn notification_exists(
        &self,
        user_id: &str,
        event_id: &str,
        days_until: i64,
    ) -> Result<bool, ApiError>;
    /// Newest first.
    async fn list_notifications_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, ApiError>;
    /// Scoped to the recipient; `None` when the row is absent or owned by
    /// someone else.
    async fn mark_notification_read(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Notification>, ApiError>;
    async fn delete_notifications_for_user(&self, user_id: &str) -> Result<u64, ApiError>;

    // -----------------------------------------------------------------
    // Club ratings
    // -----------------------------------------------------------------

    /// Upsert keyed by (event_category, event_id, host_user_id,
    /// target_club_id): replaces the scores of an existing row (keeping
    /// its id and created_at) rather than accumulating a second one.
    async fn upsert_club_rating(&self, rating: ClubRating) -> Result<ClubRating, ApiError>;
    async fn find_club_rating(
        &self,
        category: EventCategory,
        event_id: &str,
        host_user_id: &str,
        target_club_id: &str,
    ) -> Result<Option<ClubRating>, ApiError>;
    /// Every rating of the club, across all events and hosts.
    async fn list_ratings_for_club(&self, club_id: &str)
        -> Result<Vec<ClubRating>, ApiError>;
}
