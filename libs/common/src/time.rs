//! Calendar-day helpers for reminder-window computation.
//!
//! Reminder offsets are counted in whole calendar days: an event "7 days
//! out" is any event whose date falls anywhere inside the calendar day
//! seven days after today, regardless of time of day.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Midnight (00:00:00 UTC) of the calendar day containing `t`.
pub fn day_start(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Half-open window `[start, end)` covering the calendar day `offset_days`
/// after the day containing `t`.
pub fn day_window(t: DateTime<Utc>, offset_days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day_start(t) + Duration::days(offset_days);
    (start, start + Duration::days(1))
}
