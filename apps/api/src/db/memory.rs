use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::store::Store;
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

/// Club member rows are keyed by (club_id, user_id) and ratings by their
/// logical upsert key, so the map itself enforces those unique indexes.
/// Everything else is keyed by document id.
#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    sessions: HashMap<String, Session>,
    clubs: HashMap<String, Club>,
    members: HashMap<(String, String), ClubMember>,
    applications: HashMap<String, ClubApplication>,
    events: HashMap<String, Event>,
    schedules: HashMap<String, Schedule>,
    participants: HashMap<String, Participant>,
    notifications: HashMap<String, Notification>,
    ratings: HashMap<(EventCategory, String, String, String), ClubRating>,
}

// ---------------------------------------------------------------------------
// In-memory implementation (single-process deployments and tests)
// ---------------------------------------------------------------------------

/// Whole-store [`Store`] implementation over one `Mutex`.
///
/// Holding a single lock across each call makes every method an atomic
/// round trip, which is exactly the guarantee the trait promises.
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Collections::default()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    // -----------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------

    async fn insert_user(&self, user: User) -> Result<User, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(ApiError::duplicate("Email is already registered"));
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, ApiError> {
        Ok(self.inner.lock().unwrap().users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn set_user_role(&self, id: &str, role: Role) -> Result<Option<User>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.get_mut(id) {
            Some(user) => {
                user.role = role;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<bool, ApiError> {
        Ok(self.inner.lock().unwrap().users.remove(id).is_some())
    }

    // -----------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------

    async fn insert_session(&self, session: Session) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.insert(session.token.clone(), session);
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(session) = inner.sessions.get(token).cloned() {
            if session.expires_at > Utc::now() {
                return Ok(Some(session));
            }
            inner.sessions.remove(token);
        }
        Ok(None)
    }

    async fn delete_session(&self, token: &str) -> Result<(), ApiError> {
        self.inner.lock().unwrap().sessions.remove(token);
        Ok(())
    }

    async fn delete_sessions_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - inner.sessions.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Clubs
    // -----------------------------------------------------------------

    async fn insert_club(&self, club: Club) -> Result<Club, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.clubs.insert(club.id.clone(), club.clone());
        Ok(club)
    }

    async fn find_club(&self, id: &str) -> Result<Option<Club>, ApiError> {
        Ok(self.inner.lock().unwrap().clubs.get(id).cloned())
    }

    async fn list_clubs(&self, school_id: Option<&str>) -> Result<Vec<Club>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut clubs: Vec<Club> = inner
            .clubs
            .values()
            .filter(|c| school_id.is_none_or(|school| c.school_id == school))
            .cloned()
            .collect();
        clubs.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(clubs)
    }

    async fn list_clubs_owned_by(&self, user_id: &str) -> Result<Vec<Club>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut clubs: Vec<Club> = inner
            .clubs
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        clubs.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(clubs)
    }

    async fn update_club(&self, id: &str, update: UpdateClub) -> Result<Option<Club>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.clubs.get_mut(id) {
            Some(club) => {
                if let Some(theme) = update.theme {
                    club.theme = theme;
                }
                if let Some(description) = update.description {
                    club.description = description;
                }
                if let Some(contact) = update.contact {
                    club.contact = contact;
                }
                Ok(Some(club.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set_club_trust(
        &self,
        id: &str,
        trust_score: i32,
        trust_count: i32,
    ) -> Result<Option<Club>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.clubs.get_mut(id) {
            Some(club) => {
                club.trust_score = trust_score;
                club.trust_count = trust_count;
                Ok(Some(club.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_club(&self, id: &str) -> Result<bool, ApiError> {
        Ok(self.inner.lock().unwrap().clubs.remove(id).is_some())
    }

    // -----------------------------------------------------------------
    // Club members
    // -----------------------------------------------------------------

    async fn insert_club_member_if_absent(
        &self,
        member: ClubMember,
    ) -> Result<ClubMember, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (member.club_id.clone(), member.user_id.clone());
        let row = inner.members.entry(key).or_insert(member);
        Ok(row.clone())
    }

    async fn find_club_member(
        &self,
        club_id: &str,
        user_id: &str,
    ) -> Result<Option<ClubMember>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let key = (club_id.to_string(), user_id.to_string());
        Ok(inner.members.get(&key).cloned())
    }

    async fn list_club_members(&self, club_id: &str) -> Result<Vec<ClubMember>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut members: Vec<ClubMember> = inner
            .members
            .values()
            .filter(|m| m.club_id == club_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| (a.joined_at, &a.id).cmp(&(b.joined_at, &b.id)));
        Ok(members)
    }

    async fn delete_club_members_for_club(&self, club_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.members.len();
        inner.members.retain(|(club, _), _| club != club_id);
        Ok((before - inner.members.len()) as u64)
    }

    async fn delete_club_members_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.members.len();
        inner.members.retain(|(_, user), _| user != user_id);
        Ok((before - inner.members.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Club applications
    // -----------------------------------------------------------------

    async fn insert_club_application(
        &self,
        application: ClubApplication,
    ) -> Result<ClubApplication, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    async fn find_club_application(
        &self,
        id: &str,
    ) -> Result<Option<ClubApplication>, ApiError> {
        Ok(self.inner.lock().unwrap().applications.get(id).cloned())
    }

    async fn find_pending_club_application(
        &self,
        club_id: &str,
        user_id: &str,
    ) -> Result<Option<ClubApplication>, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applications
            .values()
            .find(|a| {
                a.club_id == club_id && a.user_id == user_id && a.status == ReviewStatus::Pending
            })
            .cloned())
    }

    async fn list_club_applications(
        &self,
        club_id: &str,
    ) -> Result<Vec<ClubApplication>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut applications: Vec<ClubApplication> = inner
            .applications
            .values()
            .filter(|a| a.club_id == club_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(applications)
    }

    async fn set_club_application_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<Option<ClubApplication>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.applications.get_mut(id) {
            Some(application) => {
                application.status = status;
                Ok(Some(application.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_club_applications_for_club(&self, club_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.applications.len();
        inner.applications.retain(|_, a| a.club_id != club_id);
        Ok((before - inner.applications.len()) as u64)
    }

    async fn delete_club_applications_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.applications.len();
        inner.applications.retain(|_, a| a.user_id != user_id);
        Ok((before - inner.applications.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------

    async fn insert_event(&self, event: Event) -> Result<Event, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    async fn find_event(
        &self,
        category: EventCategory,
        id: &str,
    ) -> Result<Option<Event>, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .events
            .get(id)
            .filter(|e| e.category == category)
            .cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut events: Vec<Event> = inner.events.values().cloned().collect();
        events.sort_by(|a, b| (b.date, &b.id).cmp(&(a.date, &a.id)));
        Ok(events)
    }

    async fn list_events_hosted_by(&self, user_id: &str) -> Result<Vec<Event>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut events: Vec<Event> = inner
            .events
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| (b.date, &b.id).cmp(&(a.date, &a.id)));
        Ok(events)
    }

    async fn delete_event(&self, category: EventCategory, id: &str) -> Result<bool, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let matches = inner
            .events
            .get(id)
            .is_some_and(|e| e.category == category);
        if matches {
            inner.events.remove(id);
        }
        Ok(matches)
    }

    // -----------------------------------------------------------------
    // Schedules
    // -----------------------------------------------------------------

    async fn insert_schedule(&self, schedule: Schedule) -> Result<Schedule, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.schedules.insert(schedule.id.clone(), schedule.clone());
        Ok(schedule)
    }

    async fn list_public_schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut schedules: Vec<Schedule> = inner
            .schedules
            .values()
            .filter(|s| s.is_public)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));
        Ok(schedules)
    }

    async fn list_schedules_for_user(&self, user_id: &str) -> Result<Vec<Schedule>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut schedules: Vec<Schedule> = inner
            .schedules
            .values()
            .filter(|s| !s.is_public && s.user_id == user_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));
        Ok(schedules)
    }

    async fn list_private_schedules_in_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Schedule>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut schedules: Vec<Schedule> = inner
            .schedules
            .values()
            .filter(|s| !s.is_public && s.date >= start && s.date < end)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| (a.date, &a.id).cmp(&(b.date, &b.id)));
        Ok(schedules)
    }

    async fn delete_schedules_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.schedules.len();
        inner
            .schedules
            .retain(|_, s| !(s.event_category == category && s.event_id == event_id));
        Ok((before - inner.schedules.len()) as u64)
    }

    async fn delete_schedules_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.schedules.len();
        inner.schedules.retain(|_, s| s.user_id != user_id);
        Ok((before - inner.schedules.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Participants
    // -----------------------------------------------------------------

    async fn insert_participant(
        &self,
        participant: Participant,
    ) -> Result<Participant, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let taken = inner.participants.values().any(|p| {
            p.user_id == participant.user_id
                && p.event_category == participant.event_category
                && p.event_id == participant.event_id
        });
        if taken {
            return Err(ApiError::duplicate("Already applied to this event"));
        }
        inner
            .participants
            .insert(participant.id.clone(), participant.clone());
        Ok(participant)
    }

    async fn find_participant(&self, id: &str) -> Result<Option<Participant>, ApiError> {
        Ok(self.inner.lock().unwrap().participants.get(id).cloned())
    }

    async fn find_participant_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .participants
            .values()
            .find(|p| {
                p.event_category == category && p.event_id == event_id && p.user_id == user_id
            })
            .cloned())
    }

    async fn list_participants_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<Vec<Participant>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut participants: Vec<Participant> = inner
            .participants
            .values()
            .filter(|p| p.event_category == category && p.event_id == event_id)
            .cloned()
            .collect();
        participants.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(participants)
    }

    async fn list_participations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Participant>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut participants: Vec<Participant> = inner
            .participants
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        participants.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(participants)
    }

    async fn set_participant_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<Option<Participant>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.participants.get_mut(id) {
            Some(participant) => {
                participant.status = status;
                Ok(Some(participant.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_participants_for_event(
        &self,
        category: EventCategory,
        event_id: &str,
    ) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.participants.len();
        inner
            .participants
            .retain(|_, p| !(p.event_category == category && p.event_id == event_id));
        Ok((before - inner.participants.len()) as u64)
    }

    async fn delete_participants_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.participants.len();
        inner.participants.retain(|_, p| p.user_id != user_id);
        Ok((before - inner.participants.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------

    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .notifications
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn notification_exists(
        &self,
        user_id: &str,
        event_id: &str,
        days_until: i64,
    ) -> Result<bool, ApiError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.notifications.values().any(|n| {
            n.user_id == user_id && n.event_id == event_id && n.days_until == days_until
        }))
    }

    async fn list_notifications_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut notifications: Vec<Notification> = inner
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        Ok(notifications)
    }

    async fn mark_notification_read(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Notification>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.notifications.get_mut(id) {
            Some(notification) if notification.user_id == user_id => {
                notification.is_read = true;
                Ok(Some(notification.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_notifications_for_user(&self, user_id: &str) -> Result<u64, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.notifications.len();
        inner.notifications.retain(|_, n| n.user_id != user_id);
        Ok((before - inner.notifications.len()) as u64)
    }

    // -----------------------------------------------------------------
    // Club ratings
    // -----------------------------------------------------------------

    async fn upsert_club_rating(&self, rating: ClubRating) -> Result<ClubRating, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (
            rating.event_category,
            rating.event_id.clone(),
            rating.host_user_id.clone(),
            rating.target_club_id.clone(),
        );
        match inner.ratings.get_mut(&key) {
            Some(existing) => {
                existing.professionalism = rating.professionalism;
                existing.reliability = rating.reliability;
                existing.collaboration_intent = rating.collaboration_intent;
                existing.score = rating.score;
                existing.updated_at = rating.updated_at;
                Ok(existing.clone())
            }
            None => {
                inner.ratings.insert(key, rating.clone());
                Ok(rating)
            }
        }
    }

    async fn find_club_rating(
        &self,
        category: EventCategory,
        event_id: &str,
        host_user_id: &str,
        target_club_id: &str,
    ) -> Result<Option<ClubRating>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let key = (
            category,
            event_id.to_string(),
            host_user_id.to_string(),
            target_club_id.to_string(),
        );
        Ok(inner.ratings.get(&key).cloned())
    }

    async fn list_ratings_for_club(
        &self,
        club_id: &str,
    ) -> Result<Vec<ClubRating>, ApiError> {
        let inner = self.inner.lock().unwrap();
        let mut ratings: Vec<ClubRating> = inner
            .ratings
            .values()
            .filter(|r| r.target_club_id == club_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(ratings)
    }
}
