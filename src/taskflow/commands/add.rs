use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayTask;
use crate::model::TaskDraft;
use crate::store::{StorageBackend, TaskStore};
use chrono::Utc;
use tracing::debug;

use super::helpers::default_category_id;

pub fn run<B: StorageBackend>(store: &mut TaskStore<B>, mut draft: TaskDraft) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !draft.is_valid() {
        result.add_message(CmdMessage::info(
            "Nothing saved: a task needs a title and a due date.",
        ));
        return Ok(result);
    }

    if draft.category_id.is_empty() {
        draft.category_id = default_category_id(store);
    }

    let task = draft.into_task(Utc::now());
    debug!(id = %task.id, "creating task");
    store.insert_task(task.clone())?;

    result.add_message(CmdMessage::success(format!("Task created: {}", task.title)));
    result.affected_tasks.push(DisplayTask {
        index: store.tasks().len(),
        task,
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use crate::store::mem_backend::MemBackend;

    fn store() -> TaskStore<MemBackend> {
        TaskStore::open(MemBackend::new())
    }

    #[test]
    fn creates_task_with_defaults() {
        let mut store = store();
        let result = run(&mut store, TaskDraft::new("  Write report ", "2024-05-03")).unwrap();

        assert_eq!(result.affected_tasks.len(), 1);
        assert_eq!(result.affected_tasks[0].index, 1);
        let task = &store.tasks()[0];
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.category_id, "1");
    }

    #[test]
    fn keeps_explicit_category() {
        let mut store = store();
        run(
            &mut store,
            TaskDraft::new("Run", "2024-05-03").with_category("3"),
        )
        .unwrap();
        assert_eq!(store.tasks()[0].category_id, "3");
    }

    #[test]
    fn blank_title_is_a_silent_noop() {
        let mut store = store();
        let result = run(&mut store, TaskDraft::new("   ", "2024-05-03")).unwrap();
        assert!(result.is_noop());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn missing_due_date_is_a_silent_noop() {
        let mut store = store();
        let result = run(&mut store, TaskDraft::new("Title", "")).unwrap();
        assert!(result.affected_tasks.is_empty());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn each_task_gets_a_unique_id() {
        let mut store = store();
        run(&mut store, TaskDraft::new("A", "2024-05-03")).unwrap();
        run(&mut store, TaskDraft::new("A", "2024-05-03")).unwrap();
        assert_ne!(store.tasks()[0].id, store.tasks()[1].id);
    }
}
