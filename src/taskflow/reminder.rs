//! # Reminder Evaluator
//!
//! Selects the open tasks that fall due "tomorrow": the number of days between
//! now and local midnight of the due date, rounded up, is exactly one.
//!
//! Evaluation is pure. Nothing remembers which reminders were already delivered,
//! so a periodic caller will surface the same task on every tick of the day
//! before it is due.

use crate::model::Task;
use chrono::{DateTime, NaiveTime, TimeZone};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A notification intent for a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: String,
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn for_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            title: format!("Task Due Tomorrow: {}", task.title),
            body: format!("Priority: {}", task.priority),
        }
    }
}

/// Whole days from `now` until the start of the task's due date, rounded up.
/// `None` when the due date cannot be parsed.
pub fn days_until_due<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> Option<i64> {
    let due = task.due_on()?.and_time(NaiveTime::MIN);
    let diff = due - now.naive_local();
    Some((diff.num_milliseconds() as f64 / MILLIS_PER_DAY).ceil() as i64)
}

pub fn due_tomorrow<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| !t.is_done())
        .filter(|t| days_until_due(t, now) == Some(1))
        .collect()
}

pub fn evaluate<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Vec<Reminder> {
    due_tomorrow(tasks, now)
        .into_iter()
        .map(Reminder::for_task)
        .collect()
}
