use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight, higher is more urgent.
    pub fn weight(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(format!(
                "Unknown priority '{}'. Expected low, medium or high",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        };
        f.write_str(label)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "todo" => Ok(Status::Todo),
            "inprogress" | "doing" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            _ => Err(format!(
                "Unknown status '{}'. Expected todo, in-progress or done",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date as entered, normally `YYYY-MM-DD`. Kept verbatim so that
    /// malformed values survive a load/save cycle.
    pub due_date: String,
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// The due date, or `None` when it cannot be parsed.
    pub fn due_on(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    /// Moves the task to `status`, keeping `completed_at` in step with the transition.
    pub fn set_status(&mut self, status: Status, now: DateTime<Utc>) {
        match (self.status, status) {
            (Status::Done, Status::Done) => {}
            (_, Status::Done) => self.completed_at = Some(now),
            (_, _) => self.completed_at = None,
        }
        self.status = status;
    }

    /// Done becomes To Do, anything else becomes Done.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        let next = if self.is_done() {
            Status::Todo
        } else {
            Status::Done
        };
        self.set_status(next, now);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// User-supplied task fields, before identity and timestamps are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: Status,
    pub category_id: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: due_date.into(),
            priority: Priority::default(),
            status: Status::default(),
            category_id: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    /// Required fields: a non-blank title and a due date.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.due_date.trim().is_empty()
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            status: task.status,
            category_id: task.category_id.clone(),
        }
    }

    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        let completed_at = (self.status == Status::Done).then_some(now);
        Task {
            id: new_id(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            priority: self.priority,
            status: self.status,
            category_id: self.category_id,
            created_at: now,
            completed_at,
        }
    }

    /// Overwrites every editable field of `task`. Identity and `created_at` are untouched.
    pub fn apply_to(self, task: &mut Task, now: DateTime<Utc>) {
        task.title = self.title.trim().to_string();
        task.description = self.description.trim().to_string();
        task.due_date = self.due_date.trim().to_string();
        task.priority = self.priority;
        task.category_id = self.category_id;
        task.set_status(self.status, now);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn into_category(self, now: DateTime<Utc>) -> Category {
        Category {
            id: new_id(),
            name: self.name.trim().to_string(),
            color: self.color.trim().to_string(),
            created_at: now,
        }
    }

    pub fn apply_to(self, category: &mut Category) {
        category.name = self.name.trim().to_string();
        category.color = self.color.trim().to_string();
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a due date at day granularity.
///
/// Accepts `YYYY-MM-DD`, and falls back to the date part of an RFC 3339 timestamp.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// A due date strictly before `today` is overdue. Unparsable dates never are.
pub fn is_overdue(due_date: &str, today: NaiveDate) -> bool {
    parse_due_date(due_date).is_some_and(|due| due < today)
}

pub fn default_categories(now: DateTime<Utc>) -> Vec<Category> {
    [
        ("1", "Work", "#3B82F6"),
        ("2", "Personal", "#10B981"),
        ("3", "Health", "#F59E0B"),
    ]
    .into_iter()
    .map(|(id, name, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        created_at: now,
    })
    .collect()
}
