use crate::config::TaskflowConfig;
use crate::index::{DisplayCategory, DisplayTask};
use crate::reminder::Reminder;
use crate::stats::Statistics;
use std::path::PathBuf;

pub mod add;
pub mod categories;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod list;
pub mod notifications;
pub mod remind;
pub mod stats;
pub mod toggle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_tasks: Vec<DisplayTask>,
    pub listed_tasks: Vec<DisplayTask>,
    pub listed_categories: Vec<DisplayCategory>,
    pub statistics: Option<Statistics>,
    pub reminders: Vec<Reminder>,
    pub export_path: Option<PathBuf>,
    pub config: Option<TaskflowConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_tasks(mut self, tasks: Vec<DisplayTask>) -> Self {
        self.listed_tasks = tasks;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<DisplayCategory>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_config(mut self, config: TaskflowConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when the command left the store untouched on purpose.
    pub fn is_noop(&self) -> bool {
        self.affected_tasks.is_empty()
            && self.listed_tasks.is_empty()
            && self.listed_categories.is_empty()
            && self.statistics.is_none()
            && self.reminders.is_empty()
            && self.export_path.is_none()
            && self.config.is_none()
    }
}
