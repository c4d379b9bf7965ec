//! # Storage Layer
//!
//! Persistence is a plain key-value interface: one key per collection, each
//! holding a JSON snapshot of that collection.
//!
//! ```text
//! <data_dir>/
//! ├── taskflow-tasks.json          # Vec<Task>
//! ├── taskflow-categories.json     # Vec<Category>
//! ├── taskflow-notifications.json  # bool
//! └── config.json                  # TaskflowConfig (see config.rs)
//! ```
//!
//! [`StorageBackend`] handles the "how" (filesystem vs memory) while
//! [`TaskStore`] handles the "what": it reads every key once when opened and
//! writes the affected key back after every mutation.
//!
//! ## Fallbacks
//!
//! A key that is missing, unreadable or unparsable is replaced by its default
//! (no tasks, the three default categories, notifications enabled). The failure
//! is logged and never surfaces as an error. Write failures do propagate.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, written atomically.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

use crate::error::{Result, TaskflowError};
use crate::model::{default_categories, Category, Task};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub mod fs_backend;
pub mod mem_backend;

pub const TASKS_KEY: &str = "taskflow-tasks";
pub const CATEGORIES_KEY: &str = "taskflow-categories";
pub const NOTIFICATIONS_KEY: &str = "taskflow-notifications";

/// Abstract interface for raw key-value storage.
pub trait StorageBackend {
    /// Returns `Ok(None)` when the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory task and category collections mirrored to a [`StorageBackend`].
///
/// Single writer: every mutation is applied to a copy, saved, and only then
/// committed, so memory never runs ahead of the backend.
pub struct TaskStore<B: StorageBackend> {
    backend: B,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    notifications_enabled: bool,
}

/// Result of removing a category.
#[derive(Debug, Clone)]
pub struct CategoryRemoval {
    pub category: Category,
    /// Id the orphaned tasks were moved to, empty when no category remains.
    pub reassigned_to: String,
    pub reassigned_tasks: usize,
}

impl<B: StorageBackend> TaskStore<B> {
    pub fn open(backend: B) -> Self {
        let tasks = load_or(&backend, TASKS_KEY, Vec::new);
        let categories = load_or(&backend, CATEGORIES_KEY, || default_categories(Utc::now()));
        let notifications_enabled = load_or(&backend, NOTIFICATIONS_KEY, || true);
        debug!(
            tasks = tasks.len(),
            categories = categories.len(),
            "store opened"
        );
        Self {
            backend,
            tasks,
            categories,
            notifications_enabled,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn insert_task(&mut self, task: Task) -> Result<()> {
        if self.task(&task.id).is_some() {
            return Err(TaskflowError::Store(format!(
                "Task id already exists: {}",
                task.id
            )));
        }
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        self.commit_tasks(tasks)
    }

    /// Applies `f` to the task in place and saves. Returns the updated task.
    pub fn update_task<F>(&mut self, id: &str, f: F) -> Result<Task>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.tasks.clone();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskflowError::TaskNotFound(id.to_string()))?;
        let original_id = task.id.clone();
        let original_created = task.created_at;
        f(task);
        // identity and creation time are immutable
        task.id = original_id;
        task.created_at = original_created;
        let updated = task.clone();
        self.commit_tasks(tasks)?;
        Ok(updated)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskflowError::TaskNotFound(id.to_string()))?;
        let mut tasks = self.tasks.clone();
        let removed = tasks.remove(pos);
        self.commit_tasks(tasks)?;
        Ok(removed)
    }

    pub fn insert_category(&mut self, category: Category) -> Result<()> {
        if self.category(&category.id).is_some() {
            return Err(TaskflowError::Store(format!(
                "Category id already exists: {}",
                category.id
            )));
        }
        let mut categories = self.categories.clone();
        categories.push(category);
        self.commit_categories(categories)
    }

    pub fn update_category<F>(&mut self, id: &str, f: F) -> Result<Category>
    where
        F: FnOnce(&mut Category),
    {
        let mut categories = self.categories.clone();
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TaskflowError::CategoryNotFound(id.to_string()))?;
        let original_id = category.id.clone();
        let original_created = category.created_at;
        f(category);
        category.id = original_id;
        category.created_at = original_created;
        let updated = category.clone();
        self.commit_categories(categories)?;
        Ok(updated)
    }

    /// Removes a category. Tasks pointing at it move to the first remaining
    /// category, or get an empty reference when none remain.
    pub fn remove_category(&mut self, id: &str) -> Result<CategoryRemoval> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TaskflowError::CategoryNotFound(id.to_string()))?;
        let mut categories = self.categories.clone();
        let category = categories.remove(pos);
        let reassigned_to = categories
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();

        let mut tasks = self.tasks.clone();
        let mut reassigned_tasks = 0;
        for task in tasks.iter_mut().filter(|t| t.category_id == id) {
            task.category_id = reassigned_to.clone();
            reassigned_tasks += 1;
        }

        // Tasks first: the category they move to exists before and after
        if reassigned_tasks > 0 {
            self.commit_tasks(tasks)?;
        }
        self.commit_categories(categories)?;
        Ok(CategoryRemoval {
            category,
            reassigned_to,
            reassigned_tasks,
        })
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) -> Result<()> {
        save_value(&self.backend, NOTIFICATIONS_KEY, &enabled)?;
        self.notifications_enabled = enabled;
        Ok(())
    }

    fn commit_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        save_value(&self.backend, TASKS_KEY, &tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    fn commit_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        save_value(&self.backend, CATEGORIES_KEY, &categories)?;
        self.categories = categories;
        Ok(())
    }
}

fn load_or<B, T, F>(backend: &B, key: &str, default: F) -> T
where
    B: StorageBackend,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match backend.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "unparsable snapshot, using default");
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            warn!(key, error = %e, "failed to read snapshot, using default");
            default()
        }
    }
}

fn save_value<B: StorageBackend, T: Serialize + ?Sized>(
    backend: &B,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    backend.save(key, &raw)?;
    debug!(key, bytes = raw.len(), "snapshot saved");
    Ok(())
}
