//! # Filter/Sort Engine
//!
//! Produces the task view: every task matching a [`FilterCriteria`], ordered by
//! descending priority and then by ascending due date.
//!
//! The sort is stable, so tasks with equal priority and due date keep the order
//! they have in the store. Due dates that cannot be parsed sort after every valid
//! date within the same priority band.

use crate::model::{Priority, Status, Task};
use std::cmp::Ordering;

/// Optional constraints on the task view. `None` (or an empty search) means
/// "no constraint on that field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category = Some(category_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty)
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.as_deref().is_none_or(str::is_empty)
    }

    pub fn matches(&self, task: &Task) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                task.title.to_lowercase().contains(&term)
                    || task.description.to_lowercase().contains(&term)
            }
        };
        let matches_status = self.status.is_none_or(|s| task.status == s);
        let matches_priority = self.priority.is_none_or(|p| task.priority == p);
        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(id) => task.category_id == id,
        };

        matches_search && matches_status && matches_priority && matches_category
    }
}

/// Higher priority first, then earlier due date. Unparsable due dates go last.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    b.priority
        .weight()
        .cmp(&a.priority.weight())
        .then_with(|| match (a.due_on(), b.due_on()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Returns references to the matching tasks in view order.
pub fn filter_tasks<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    let mut matched: Vec<&Task> = tasks.iter().filter(|t| criteria.matches(t)).collect();
    // sort_by is stable
    matched.sort_by(|a, b| compare_tasks(a, b));
    matched
}
