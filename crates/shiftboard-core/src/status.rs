//! Task status classification.
//!
//! Completion is judged only by `completed_at`; the upstream boolean flag is
//! not trusted. Each task lands in exactly one bucket:
//!
//! - completed, at or before the list deadline (or no deadline): **on_time**
//! - completed after the deadline: **late**
//! - not completed, deadline passed: **missed**
//! - not completed, deadline ahead (or no deadline): **in_progress**
//!
//! A non-empty list where no task has a completion timestamp is counted as
//! entirely missed, whatever the deadline says.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::{Counters, TaskList};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an upstream timestamp, returning `None` for anything unrecognized.
///
/// Offset-less values are taken as UTC; a bare date means UTC midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 23:59:59.999 UTC on the given `YYYY-MM-DD` date.
fn end_of_day(date: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .map(|naive| naive.and_utc())
}

/// Effective deadline of a list: explicit `due` first, then end of its date.
pub fn resolve_list_deadline(list: &TaskList) -> Option<DateTime<Utc>> {
    list.due
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| end_of_day(&list.date))
}

/// True when the list has tasks and none of them carries `completed_at`.
pub fn is_zero_progress(list: &TaskList) -> bool {
    !list.tasks.is_empty() && list.tasks.iter().all(|t| !t.has_completion())
}

/// Count the tasks of `list` per status bucket as of `now`.
pub fn count_list(list: &TaskList, now: DateTime<Utc>) -> Counters {
    if is_zero_progress(list) {
        return Counters {
            missed: u32::try_from(list.tasks.len()).unwrap_or(u32::MAX),
            ..Counters::default()
        };
    }

    let deadline = resolve_list_deadline(list);
    let mut result = Counters::default();

    for task in &list.tasks {
        let done_at = task.completed_at.as_deref().and_then(parse_timestamp);
        match (done_at, deadline) {
            (Some(_), None) => result.on_time += 1,
            (Some(done), Some(due)) if done <= due => result.on_time += 1,
            (Some(_), Some(_)) => result.late += 1,
            (None, None) => result.in_progress += 1,
            (None, Some(due)) if now > due => result.missed += 1,
            (None, Some(_)) => result.in_progress += 1,
        }
    }

    result
}

/// Share of completed tasks (on time or late), rounded half up, 0 when empty.
pub fn progress_percent(c: &Counters) -> u32 {
    let total = u64::from(c.total());
    if total == 0 {
        return 0;
    }
    let done = u64::from(c.done());
    ((200 * done + total) / (2 * total)) as u32
}
