//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! taskflow operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*` function
//! - **Normalizes inputs**: display indexes become [`Selector`]s, category names
//!   and indexes become category ids, "now" is read from the local clock
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and no formatting.
//!
//! `TaskflowApi<B: StorageBackend>` is generic over storage: `FsBackend` in the
//! binary, `MemBackend` in tests.

use crate::commands;
use crate::error::{Result, TaskflowError};
use crate::filter::FilterCriteria;
use crate::index::Selector;
use crate::model::{CategoryDraft, Priority, Status, TaskDraft};
use crate::notify::NotificationSink;
use crate::store::fs_backend::FsBackend;
use crate::store::{StorageBackend, TaskStore};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// View constraints as typed by a user. The category may be a name, index or id.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

pub struct TaskflowApi<B: StorageBackend> {
    store: TaskStore<B>,
    data_dir: PathBuf,
}

impl TaskflowApi<FsBackend> {
    /// Opens the file-backed store rooted at `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let store = TaskStore::open(FsBackend::new(data_dir.clone()));
        Self::new(store, data_dir)
    }
}

impl<B: StorageBackend> TaskflowApi<B> {
    pub fn new(store: TaskStore<B>, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn store(&self) -> &TaskStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_tasks(&self, query: TaskQuery) -> Result<CmdResult> {
        let criteria = self.criteria(query)?;
        commands::list::run(&self.store, &criteria)
    }

    pub fn add_task(&mut self, mut draft: TaskDraft, category: Option<&str>) -> Result<CmdResult> {
        if let Some(reference) = category {
            draft.category_id = self.category_id(reference)?;
        }
        commands::add::run(&mut self.store, draft)
    }

    /// `update.category_id` may hold a category name or index; it is resolved here.
    pub fn edit_task(&mut self, index: &str, mut update: TaskUpdate) -> Result<CmdResult> {
        let selector = parse_selector(index)?;
        if let Some(reference) = update.category_id.take() {
            update.category_id = Some(self.category_id(&reference)?);
        }
        commands::edit::run(&mut self.store, &selector, update)
    }

    pub fn toggle_tasks<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::toggle::run(&mut self.store, &selectors)
    }

    pub fn delete_tasks<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn statistics(&self) -> Result<CmdResult> {
        self.statistics_at(&Local::now())
    }

    pub fn statistics_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<CmdResult> {
        commands::stats::run(&self.store, now)
    }

    /// Exports the view to `output`, or to a dated file in the configured export directory.
    pub fn export_tasks(&self, query: TaskQuery, output: Option<PathBuf>) -> Result<CmdResult> {
        let criteria = self.criteria(query)?;
        let target = match output {
            Some(path) => ExportTarget::File(path),
            None => {
                let config = crate::config::TaskflowConfig::load(&self.data_dir)?;
                ExportTarget::Dir(config.export_dir_or(&std::env::current_dir()?))
            }
        };
        commands::export::run(&self.store, &criteria, &target, Utc::now().date_naive())
    }

    pub fn list_categories(&self) -> Result<CmdResult> {
        commands::categories::list(&self.store)
    }

    pub fn add_category(&mut self, draft: CategoryDraft) -> Result<CmdResult> {
        commands::categories::add(&mut self.store, draft)
    }

    pub fn edit_category(&mut self, index: &str, update: CategoryUpdate) -> Result<CmdResult> {
        let selector = self.category_selector(index)?;
        commands::categories::edit(&mut self.store, &selector, update)
    }

    pub fn delete_category(&mut self, index: &str) -> Result<CmdResult> {
        let selector = self.category_selector(index)?;
        commands::categories::delete(&mut self.store, &selector)
    }

    pub fn notifications(&mut self, enabled: Option<bool>) -> Result<CmdResult> {
        commands::notifications::run(&mut self.store, enabled)
    }

    pub fn remind<S: NotificationSink>(&self, sink: &mut S) -> Result<CmdResult> {
        self.remind_at(sink, &Local::now())
    }

    pub fn remind_at<S: NotificationSink, Tz: TimeZone>(
        &self,
        sink: &mut S,
        now: &DateTime<Tz>,
    ) -> Result<CmdResult> {
        commands::remind::run(&self.store, sink, now)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    fn criteria(&self, query: TaskQuery) -> Result<FilterCriteria> {
        let category = match query.category.filter(|c| !c.trim().is_empty()) {
            Some(reference) => Some(self.category_id(&reference)?),
            None => None,
        };
        Ok(FilterCriteria {
            search: query.search.filter(|s| !s.trim().is_empty()),
            status: query.status,
            priority: query.priority,
            category,
        })
    }

    fn category_id(&self, reference: &str) -> Result<String> {
        commands::helpers::category_ref(&self.store, reference)
    }

    /// Categories are addressed by name too, so resolve to an id first.
    fn category_selector(&self, reference: &str) -> Result<Selector> {
        self.category_id(reference).map(Selector::Id)
    }
}

fn parse_selector(input: &str) -> Result<Selector> {
    input.parse().map_err(TaskflowError::Api)
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<Selector>> {
    if inputs.is_empty() {
        return Err(TaskflowError::Api("No task index given".to_string()));
    }
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}

pub use crate::commands::categories::CategoryUpdate;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::edit::TaskUpdate;
pub use crate::commands::export::ExportTarget;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use crate::store::mem_backend::MemBackend;

    fn api() -> TaskflowApi<MemBackend> {
        TaskflowApi::new(TaskStore::open(MemBackend::new()), PathBuf::from("."))
    }

    #[test]
    fn add_resolves_category_name() {
        let mut api = api();
        api.add_task(TaskDraft::new("Run", "2024-05-01"), Some("health"))
            .unwrap();
        assert_eq!(api.store().tasks()[0].category_id, "3");
    }

    #[test]
    fn add_with_unknown_category_fails() {
        let mut api = api();
        assert!(api
            .add_task(TaskDraft::new("Run", "2024-05-01"), Some("Garden"))
            .is_err());
        assert!(api.store().tasks().is_empty());
    }

    #[test]
    fn list_filters_by_category_reference() {
        let mut api = api();
        api.add_task(TaskDraft::new("a", "2024-05-01"), Some("Work"))
            .unwrap();
        api.add_task(TaskDraft::new("b", "2024-05-01"), Some("Personal"))
            .unwrap();

        let query = TaskQuery {
            category: Some("2".into()),
            ..Default::default()
        };
        let result = api.list_tasks(query).unwrap();
        assert_eq!(result.listed_tasks.len(), 1);
        assert_eq!(result.listed_tasks[0].task.title, "b");
        assert_eq!(result.listed_tasks[0].index, 2);
    }

    #[test]
    fn blank_category_filter_matches_everything() {
        let mut api = api();
        api.add_task(TaskDraft::new("a", "2024-05-01"), Some("Work"))
            .unwrap();
        api.add_task(TaskDraft::new("b", "2024-05-01"), None).unwrap();

        for blank in ["", "  "] {
            let query = TaskQuery {
                category: Some(blank.into()),
                ..Default::default()
            };
            let result = api.list_tasks(query).unwrap();
            assert_eq!(result.listed_tasks.len(), 2);
        }
    }

    #[test]
    fn edit_resolves_category_reference() {
        let mut api = api();
        api.add_task(TaskDraft::new("a", "2024-05-01"), None).unwrap();
        let update = TaskUpdate {
            category_id: Some("Personal".into()),
            ..Default::default()
        };
        api.edit_task("1", update).unwrap();
        assert_eq!(api.store().tasks()[0].category_id, "2");
    }

    #[test]
    fn toggle_requires_valid_indexes() {
        let mut api = api();
        let none: [&str; 0] = [];
        assert!(api.toggle_tasks(&none).is_err());
        assert!(api.toggle_tasks(&["0"]).is_err());
    }

    #[test]
    fn category_addressed_by_name() {
        let mut api = api();
        api.delete_category("work").unwrap();
        let names: Vec<_> = api
            .store()
            .categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Personal", "Health"]);
    }

    #[test]
    fn remind_uses_given_clock() {
        let mut api = api();
        api.add_task(TaskDraft::new("Dentist", "2024-05-02"), None)
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut sink = RecordingSink::default();
        let result = api.remind_at(&mut sink, &now).unwrap();
        assert_eq!(result.reminders.len(), 1);
    }
}
