use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::{filter_tasks, FilterCriteria};
use crate::index::index_view;
use crate::store::{StorageBackend, TaskStore};

pub fn run<B: StorageBackend>(store: &TaskStore<B>, criteria: &FilterCriteria) -> Result<CmdResult> {
    let view = filter_tasks(store.tasks(), criteria);
    Ok(CmdResult::default().with_listed_tasks(index_view(store.tasks(), &view)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::{Priority, Status, TaskDraft};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn lists_sorted_with_store_indexes() {
        let mut store = TaskStore::open(MemBackend::new());
        add::run(
            &mut store,
            TaskDraft::new("low", "2024-05-06").with_priority(Priority::Low),
        )
        .unwrap();
        add::run(
            &mut store,
            TaskDraft::new("high", "2024-05-11").with_priority(Priority::High),
        )
        .unwrap();

        let result = run(&store, &FilterCriteria::default()).unwrap();
        let listed: Vec<_> = result
            .listed_tasks
            .iter()
            .map(|d| (d.index, d.task.title.as_str()))
            .collect();
        assert_eq!(listed, vec![(2, "high"), (1, "low")]);
    }

    #[test]
    fn filters_by_status() {
        let mut store = TaskStore::open(MemBackend::new());
        add::run(&mut store, TaskDraft::new("a", "2024-05-06")).unwrap();
        let result = run(&store, &FilterCriteria::default().with_status(Status::Done)).unwrap();
        assert!(result.listed_tasks.is_empty());
    }
}
