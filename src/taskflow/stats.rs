//! # Statistics Engine
//!
//! Summary counts over the whole task collection, relative to a caller-supplied
//! instant. The time zone of `now` defines what "today" and "this week" mean.
//!
//! Day truncation rules:
//! - `completed_today` truncates both the completion instant and now to the calendar day.
//! - `completed_this_week` truncates only the boundary (Sunday 00:00); the completion
//!   instant is compared as-is.
//! - `overdue_tasks` compares the due date with today at day granularity.

use crate::model::{is_overdue, Task};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completed_today: usize,
    pub completed_this_week: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    /// Percentage of Done tasks, `0.0` for an empty collection.
    pub completion_rate: f64,
}

/// Midnight of the most recent Sunday at or before `now`'s date.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    let today = now.date_naive();
    let offset = i64::from(today.weekday().num_days_from_sunday());
    (today - Duration::days(offset)).and_time(NaiveTime::MIN)
}

pub fn calculate_statistics<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Statistics {
    let tz = now.timezone();
    let today = now.date_naive();
    let boundary = week_start(now);

    let total_tasks = tasks.len();
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.is_done()).collect();

    let completed_today = completed
        .iter()
        .filter_map(|t| t.completed_at)
        .filter(|at| at.with_timezone(&tz).date_naive() == today)
        .count();

    let completed_this_week = completed
        .iter()
        .filter_map(|t| t.completed_at)
        .filter(|at| at.with_timezone(&tz).naive_local() >= boundary)
        .count();

    let pending_tasks = total_tasks - completed.len();

    let overdue_tasks = tasks
        .iter()
        .filter(|t| !t.is_done() && is_overdue(&t.due_date, today))
        .count();

    let completion_rate = if total_tasks > 0 {
        completed.len() as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    Statistics {
        total_tasks,
        completed_tasks: completed.len(),
        completed_today,
        completed_this_week,
        pending_tasks,
        overdue_tasks,
        completion_rate,
    }
}
