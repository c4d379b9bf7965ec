use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayTask, Selector};
use crate::model::{Priority, Status, TaskDraft};
use crate::store::{StorageBackend, TaskStore};
use chrono::Utc;

use super::helpers::resolve_task;

/// Fields to overwrite on an existing task. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub category_id: Option<String>,
}

impl TaskUpdate {
    fn merge_into(self, mut draft: TaskDraft) -> TaskDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(due_date) = self.due_date {
            draft.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(category_id) = self.category_id {
            draft.category_id = category_id;
        }
        draft
    }
}

pub fn run<B: StorageBackend>(
    store: &mut TaskStore<B>,
    selector: &Selector,
    update: TaskUpdate,
) -> Result<CmdResult> {
    let (index, current) = resolve_task(store, selector)?;
    let id = current.id.clone();
    let draft = update.merge_into(TaskDraft::from_task(current));

    let mut result = CmdResult::default();
    if !draft.is_valid() {
        result.add_message(CmdMessage::info(
            "Nothing saved: a task needs a title and a due date.",
        ));
        return Ok(result);
    }

    let now = Utc::now();
    let task = store.update_task(&id, |task| draft.apply_to(task, now))?;
    result.add_message(CmdMessage::success(format!(
        "Task updated ({}): {}",
        index, task.title
    )));
    result.affected_tasks.push(DisplayTask { index, task });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::mem_backend::MemBackend;

    fn store_with_task() -> TaskStore<MemBackend> {
        let mut store = TaskStore::open(MemBackend::new());
        add::run(
            &mut store,
            TaskDraft::new("Original", "2024-05-03").with_description("desc"),
        )
        .unwrap();
        store
    }

    #[test]
    fn overwrites_only_given_fields() {
        let mut store = store_with_task();
        let before = store.tasks()[0].clone();
        let update = TaskUpdate {
            title: Some("Renamed".into()),
            priority: Some(Priority::High),
            ..Default::default()
        };
        run(&mut store, &Selector::Index(1), update).unwrap();

        let after = &store.tasks()[0];
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.priority, Priority::High);
        assert_eq!(after.description, "desc");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn status_change_to_done_sets_completed_at() {
        let mut store = store_with_task();
        let update = TaskUpdate {
            status: Some(Status::Done),
            ..Default::default()
        };
        run(&mut store, &Selector::Index(1), update).unwrap();
        assert!(store.tasks()[0].completed_at.is_some());

        let update = TaskUpdate {
            status: Some(Status::InProgress),
            ..Default::default()
        };
        run(&mut store, &Selector::Index(1), update).unwrap();
        assert!(store.tasks()[0].completed_at.is_none());
    }

    #[test]
    fn blanking_title_is_a_noop() {
        let mut store = store_with_task();
        let update = TaskUpdate {
            title: Some("  ".into()),
            ..Default::default()
        };
        let result = run(&mut store, &Selector::Index(1), update).unwrap();
        assert!(result.affected_tasks.is_empty());
        assert_eq!(store.tasks()[0].title, "Original");
    }

    #[test]
    fn unknown_index_is_an_error() {
        let mut store = store_with_task();
        assert!(run(&mut store, &Selector::Index(9), TaskUpdate::default()).is_err());
    }
}
