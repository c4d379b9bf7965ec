use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayTask, Selector};
use crate::store::{StorageBackend, TaskStore};

use super::helpers::resolve_task;

/// Removes the selected tasks. Confirmation is the caller's job.
pub fn run<B: StorageBackend>(
    store: &mut TaskStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult> {
    // Resolve everything up front: indexes shift as tasks are removed
    let mut resolved: Vec<(usize, String)> = selectors
        .iter()
        .map(|s| resolve_task(store, s).map(|(idx, t)| (idx, t.id.clone())))
        .collect::<Result<_>>()?;
    resolved.sort();
    resolved.dedup();

    let mut result = CmdResult::default();
    for (index, id) in resolved {
        let task = store.remove_task(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Task deleted ({}): {}",
            index, task.title
        )));
        result.affected_tasks.push(DisplayTask { index, task });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::TaskDraft;
    use crate::store::mem_backend::MemBackend;

    fn store() -> TaskStore<MemBackend> {
        let mut store = TaskStore::open(MemBackend::new());
        for title in ["a", "b", "c"] {
            add::run(&mut store, TaskDraft::new(title, "2024-05-03")).unwrap();
        }
        store
    }

    #[test]
    fn removes_selected_tasks() {
        let mut store = store();
        let result = run(&mut store, &[Selector::Index(3), Selector::Index(1)]).unwrap();
        assert_eq!(result.affected_tasks.len(), 2);
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b"]);
    }

    #[test]
    fn duplicate_selectors_delete_once() {
        let mut store = store();
        let id = store.tasks()[1].id.clone();
        let result = run(&mut store, &[Selector::Index(2), Selector::Id(id)]).unwrap();
        assert_eq!(result.affected_tasks.len(), 1);
        assert_eq!(store.tasks().len(), 2);
    }
}
