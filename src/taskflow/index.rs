//! # Task Identifiers: Id vs Display Index
//!
//! Records carry an opaque id (a UUID for anything created here), which is the
//! correct technical identity but awkward to type. The CLI therefore addresses
//! records by a **display index**: the 1-based position of the record in its
//! store.
//!
//! The index is derived from store order, never from the current view. Filtering
//! and sorting change which tasks are shown and in what order, but task `3` is
//! the same task in every view, so `taskflow toggle 3` is unambiguous after any
//! `taskflow list --search ...`.
//!
//! Indexes shift only when an earlier record is deleted.
//!
//! A raw id is accepted anywhere an index is (see [`Selector`]).

use crate::model::{Category, Task};
use std::fmt;
use std::str::FromStr;

/// How the user refers to a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Index(usize),
    Id(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{}", i),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty task reference".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(Selector::Index(n)),
            Err(_) => Ok(Selector::Id(s.to_string())),
        }
    }
}

/// Something a [`Selector`] can find.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Finds the record a selector points at, together with its display index.
pub fn resolve<'a, T: Identified>(items: &'a [T], selector: &Selector) -> Option<(usize, &'a T)> {
    match selector {
        Selector::Index(n) => items.get(n.checked_sub(1)?).map(|item| (*n, item)),
        Selector::Id(id) => items
            .iter()
            .position(|item| item.id() == id)
            .map(|pos| (pos + 1, &items[pos])),
    }
}

/// A task paired with its canonical display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTask {
    pub index: usize,
    pub task: Task,
}

/// A category with its display index and the number of tasks that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCategory {
    pub index: usize,
    pub category: Category,
    pub task_count: usize,
}

/// Pairs a view (any subset of `all`, in any order) with canonical indexes from `all`.
pub fn index_view(all: &[Task], view: &[&Task]) -> Vec<DisplayTask> {
    view.iter()
        .filter_map(|task| {
            all.iter()
                .position(|t| t.id == task.id)
                .map(|pos| DisplayTask {
                    index: pos + 1,
                    task: (*task).clone(),
                })
        })
        .collect()
}

pub fn index_categories(categories: &[Category], tasks: &[Task]) -> Vec<DisplayCategory> {
    categories
        .iter()
        .enumerate()
        .map(|(pos, category)| DisplayCategory {
            index: pos + 1,
            category: category.clone(),
            task_count: tasks.iter().filter(|t| t.category_id == category.id).count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_categories, TaskDraft};
    use chrono::Utc;

    fn tasks() -> Vec<Task> {
        ["a", "b", "c"]
            .iter()
            .map(|t| TaskDraft::new(*t, "2024-05-01").into_task(Utc::now()))
            .collect()
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            "abc-123".parse::<Selector>().unwrap(),
            Selector::Id("abc-123".into())
        );
        assert!("0".parse::<Selector>().is_err());
        assert!(" ".parse::<Selector>().is_err());
    }

    #[test]
    fn test_resolve_by_index_and_id() {
        let tasks = tasks();
        let (idx, task) = resolve(&tasks, &Selector::Index(2)).unwrap();
        assert_eq!((idx, task.title.as_str()), (2, "b"));

        let (idx, task) = resolve(&tasks, &Selector::Id(tasks[2].id.clone())).unwrap();
        assert_eq!((idx, task.title.as_str()), (3, "c"));

        assert!(resolve(&tasks, &Selector::Index(4)).is_none());
        assert!(resolve(&tasks, &Selector::Id("missing".into())).is_none());
    }

    #[test]
    fn test_view_keeps_canonical_indexes() {
        let tasks = tasks();
        let view = vec![&tasks[2], &tasks[0]];
        let indexed = index_view(&tasks, &view);
        let pairs: Vec<_> = indexed
            .iter()
            .map(|d| (d.index, d.task.title.as_str()))
            .collect();
        assert_eq!(pairs, vec![(3, "c"), (1, "a")]);
    }

    #[test]
    fn test_index_categories_counts_tasks() {
        let categories = default_categories(Utc::now());
        let mut tasks = tasks();
        tasks[0].category_id = "2".into();
        tasks[1].category_id = "2".into();
        let indexed = index_categories(&categories, &tasks);
        assert_eq!(indexed[0].task_count, 0);
        assert_eq!(indexed[1].task_count, 2);
        assert_eq!(indexed[1].index, 2);
    }
}
