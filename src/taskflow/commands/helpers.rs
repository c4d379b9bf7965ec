use crate::error::{Result, TaskflowError};
use crate::index::{resolve, Selector};
use crate::model::{Category, Task};
use crate::store::{StorageBackend, TaskStore};

pub fn resolve_task<'a, B: StorageBackend>(
    store: &'a TaskStore<B>,
    selector: &Selector,
) -> Result<(usize, &'a Task)> {
    resolve(store.tasks(), selector)
        .ok_or_else(|| TaskflowError::TaskNotFound(selector.to_string()))
}

pub fn resolve_category<'a, B: StorageBackend>(
    store: &'a TaskStore<B>,
    selector: &Selector,
) -> Result<(usize, &'a Category)> {
    resolve(store.categories(), selector)
        .ok_or_else(|| TaskflowError::CategoryNotFound(selector.to_string()))
}

/// Resolves what a user typed for a category: an index, an id, or a name
/// (case-insensitive). Returns the category id.
pub fn category_ref<B: StorageBackend>(store: &TaskStore<B>, reference: &str) -> Result<String> {
    let reference = reference.trim();
    if let Some(cat) = store
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(reference))
    {
        return Ok(cat.id.clone());
    }
    let selector: Selector = reference
        .parse()
        .map_err(|_| TaskflowError::CategoryNotFound(reference.to_string()))?;
    resolve_category(store, &selector).map(|(_, c)| c.id.clone())
}

/// Id of the category new tasks land in when none is given.
pub fn default_category_id<B: StorageBackend>(store: &TaskStore<B>) -> String {
    store
        .categories()
        .first()
        .map(|c| c.id.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_category_ref_by_name_index_and_id() {
        let store = TaskStore::open(MemBackend::new());
        assert_eq!(category_ref(&store, "personal").unwrap(), "2");
        assert_eq!(category_ref(&store, "3").unwrap(), "3");
        assert!(category_ref(&store, "Hobbies").is_err());
    }

    #[test]
    fn test_default_category_is_first() {
        let store = TaskStore::open(MemBackend::new());
        assert_eq!(default_category_id(&store), "1");
    }
}
