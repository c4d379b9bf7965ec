use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{index_categories, DisplayCategory, Selector};
use crate::model::CategoryDraft;
use crate::store::{StorageBackend, TaskStore};
use chrono::Utc;

use super::helpers::resolve_category;

pub fn list<B: StorageBackend>(store: &TaskStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default()
        .with_listed_categories(index_categories(store.categories(), store.tasks())))
}

pub fn add<B: StorageBackend>(store: &mut TaskStore<B>, draft: CategoryDraft) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !draft.is_valid() {
        result.add_message(CmdMessage::info("Nothing saved: a category needs a name."));
        return Ok(result);
    }

    let category = draft.into_category(Utc::now());
    store.insert_category(category.clone())?;

    result.add_message(CmdMessage::success(format!(
        "Category created: {}",
        category.name
    )));
    result.listed_categories.push(DisplayCategory {
        index: store.categories().len(),
        category,
        task_count: 0,
    });
    Ok(result)
}

/// Fields to overwrite on an existing category. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub fn edit<B: StorageBackend>(
    store: &mut TaskStore<B>,
    selector: &Selector,
    update: CategoryUpdate,
) -> Result<CmdResult> {
    let (index, current) = resolve_category(store, selector)?;
    let id = current.id.clone();
    let draft = CategoryDraft::new(update.name.unwrap_or_else(|| current.name.clone()))
        .with_color(update.color.unwrap_or_else(|| current.color.clone()));

    let mut result = CmdResult::default();
    if !draft.is_valid() {
        result.add_message(CmdMessage::info("Nothing saved: a category needs a name."));
        return Ok(result);
    }

    let category = store.update_category(&id, |c| draft.apply_to(c))?;
    let task_count = store
        .tasks()
        .iter()
        .filter(|t| t.category_id == category.id)
        .count();
    result.add_message(CmdMessage::success(format!(
        "Category updated ({}): {}",
        index, category.name
    )));
    result.listed_categories.push(DisplayCategory {
        index,
        category,
        task_count,
    });
    Ok(result)
}

/// Deletes a category. Its tasks move to the first remaining category.
pub fn delete<B: StorageBackend>(store: &mut TaskStore<B>, selector: &Selector) -> Result<CmdResult> {
    let (_, current) = resolve_category(store, selector)?;
    let id = current.id.clone();
    let removal = store.remove_category(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category deleted: {}",
        removal.category.name
    )));
    if removal.reassigned_tasks > 0 {
        let target = store
            .category(&removal.reassigned_to)
            .map(|c| c.name.clone());
        let message = match target {
            Some(name) => format!("{} task(s) moved to {}", removal.reassigned_tasks, name),
            None => format!(
                "{} task(s) are now uncategorized",
                removal.reassigned_tasks
            ),
        };
        result.add_message(CmdMessage::warning(message));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add as add_task, MessageLevel};
    use crate::model::TaskDraft;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn list_counts_tasks_per_category() {
        let mut store = TaskStore::open(MemBackend::new());
        add_task::run(&mut store, TaskDraft::new("a", "2024-05-03").with_category("2")).unwrap();
        let result = list(&store).unwrap();
        let counts: Vec<_> = result
            .listed_categories
            .iter()
            .map(|c| (c.category.name.as_str(), c.task_count))
            .collect();
        assert_eq!(counts, vec![("Work", 0), ("Personal", 1), ("Health", 0)]);
    }

    #[test]
    fn add_defaults_color_and_rejects_blank() {
        let mut store = TaskStore::open(MemBackend::new());
        add(&mut store, CategoryDraft::new("  Hobbies ")).unwrap();
        let added = &store.categories()[3];
        assert_eq!(added.name, "Hobbies");
        assert_eq!(added.color, "#3B82F6");

        let result = add(&mut store, CategoryDraft::new("   ")).unwrap();
        assert!(result.is_noop());
        assert_eq!(store.categories().len(), 4);
    }

    #[test]
    fn edit_keeps_unset_fields() {
        let mut store = TaskStore::open(MemBackend::new());
        edit(
            &mut store,
            &Selector::Index(3),
            CategoryUpdate {
                name: Some("Fitness".into()),
                color: None,
            },
        )
        .unwrap();
        let edited = &store.categories()[2];
        assert_eq!(edited.name, "Fitness");
        assert_eq!(edited.color, "#F59E0B");
        assert_eq!(edited.id, "3");
    }

    #[test]
    fn delete_reassigns_to_first_remaining() {
        let mut store = TaskStore::open(MemBackend::new());
        add_task::run(&mut store, TaskDraft::new("a", "2024-05-03").with_category("1")).unwrap();

        let result = delete(&mut store, &Selector::Index(1)).unwrap();
        assert_eq!(store.tasks()[0].category_id, "2");
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("Personal")));
    }

    #[test]
    fn delete_last_category_leaves_empty_reference() {
        let mut store = TaskStore::open(MemBackend::new());
        add_task::run(&mut store, TaskDraft::new("a", "2024-05-03").with_category("3")).unwrap();
        for _ in 0..3 {
            delete(&mut store, &Selector::Index(1)).unwrap();
        }
        assert!(store.categories().is_empty());
        assert_eq!(store.tasks()[0].category_id, "");
    }

    #[test]
    fn unknown_category_is_an_error() {
        let mut store = TaskStore::open(MemBackend::new());
        assert!(delete(&mut store, &Selector::Index(9)).is_err());
    }
}
