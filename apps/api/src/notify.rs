//! Workflow notification side effects.
//!
//! Each emit runs after its primary write has landed and is not rolled
//! back with it; a failure here surfaces as a 500 even though the primary
//! effect committed.

use chrono::Utc;
use moyeora_common::id::PrefixedId;

use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::club::Club;
use crate::models::event::Event;
use crate::models::notification::Notification;
use crate::models::status::ReviewStatus;

/// Tell the event host that someone applied.
pub async fn participation_applied(
    store: &dyn Store,
    event: &Event,
    applicant_name: &str,
) -> Result<(), ApiError> {
    store
        .insert_notification(Notification {
            id: Notification::generate(),
            user_id: event.user_id.clone(),
            event_category: Some(event.category),
            event_id: event.id.clone(),
            event_name: format!("{}님이 참가 신청", applicant_name),
            event_date: Some(event.date),
            days_until: 0,
            is_read: false,
            created_at: Utc::now(),
        })
        .await?;
    Ok(())
}

/// Tell the applicant the host's decision on their participation.
pub async fn participation_decided(
    store: &dyn Store,
    event: &Event,
    applicant_id: &str,
    status: ReviewStatus,
) -> Result<(), ApiError> {
    let event_name = match status {
        ReviewStatus::Approved => format!("{} 참가 신청이 승인되었습니다", event.name),
        ReviewStatus::Rejected => format!("{} 참가 신청이 거절되었습니다", event.name),
        ReviewStatus::Pending => format!("{} 참가 신청이 대기 중으로 변경되었습니다", event.name),
    };
    store
        .insert_notification(Notification {
            id: Notification::generate(),
            user_id: applicant_id.to_string(),
            event_category: Some(event.category),
            event_id: event.id.clone(),
            event_name,
            event_date: Some(event.date),
            days_until: 0,
            is_read: false,
            created_at: Utc::now(),
        })
        .await?;
    Ok(())
}

/// Tell the club's creator that someone asked to join.
pub async fn club_application_received(
    store: &dyn Store,
    club: &Club,
    applicant_name: &str,
) -> Result<(), ApiError> {
    store
        .insert_notification(Notification {
            id: Notification::generate(),
            user_id: club.user_id.clone(),
            event_category: None,
            event_id: club.id.clone(),
            event_name: format!("{}님이 가입 신청", applicant_name),
            event_date: None,
            days_until: 0,
            is_read: false,
            created_at: Utc::now(),
        })
        .await?;
    Ok(())
}

/// Tell the applicant the club's decision on their join request.
pub async fn club_application_decided(
    store: &dyn Store,
    club: &Club,
    applicant_id: &str,
    status: ReviewStatus,
) -> Result<(), ApiError> {
    let event_name = match status {
        ReviewStatus::Approved => format!("{} 가입 신청이 승인되었습니다", club.name),
        ReviewStatus::Rejected => format!("{} 가입 신청이 거절되었습니다", club.name),
        ReviewStatus::Pending => format!("{} 가입 신청이 대기 중으로 변경되었습니다", club.name),
    };
    store
        .insert_notification(Notification {
            id: Notification::generate(),
            user_id: applicant_id.to_string(),
            event_category: None,
            event_id: club.id.clone(),
            event_name,
            event_date: None,
            days_until: 0,
            is_read: false,
            created_at: Utc::now(),
        })
        .await?;
    Ok(())
}
