//! Event-reminder scheduler.
//!
//! One tick scans the private schedule mirror for events landing exactly
//! 7, 3 or 1 UTC days ahead and emits a reminder notification per row,
//! once per (user, event, offset).

use chrono::{DateTime, Utc};
use moyeora_common::id::PrefixedId;
use moyeora_common::time::day_window;

use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::notification::Notification;

/// Whole-day offsets (UTC) at which reminders fire.
pub const REMINDER_OFFSETS: [i64; 3] = [7, 3, 1];

/// One scheduler pass; returns the number of notifications created.
///
/// Re-running a tick for the same day creates nothing: the
/// (user_id, event_id, days_until) existence check absorbs retries and
/// overlapping cron fires. Existing notifications are never touched.
pub async fn run_reminder_tick(store: &dyn Store, now: DateTime<Utc>) -> Result<u64, ApiError> {
    let mut created = 0u64;

    for offset in REMINDER_OFFSETS {
        let (start, end) = day_window(now, offset);
        for schedule in store.list_private_schedules_in_window(start, end).await? {
            let exists = store
                .notification_exists(&schedule.user_id, &schedule.event_id, offset)
                .await?;
            if exists {
                continue;
            }

            store
                .insert_notification(Notification {
                    id: Notification::generate(),
                    user_id: schedule.user_id.clone(),
                    event_category: Some(schedule.event_category),
                    event_id: schedule.event_id.clone(),
                    event_name: schedule.name.clone(),
                    event_date: Some(schedule.date),
                    days_until: offset,
                    is_read: false,
                    created_at: now,
                })
                .await?;
            created += 1;
        }
    }

    tracing::info!(created, "reminder tick complete");
    Ok(created)
}
