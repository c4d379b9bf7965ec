use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayTask, Selector};
use crate::store::{StorageBackend, TaskStore};
use chrono::Utc;

use super::helpers::resolve_task;

/// Flips each selected task between Done and To Do.
pub fn run<B: StorageBackend>(
    store: &mut TaskStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult> {
    let resolved: Vec<(usize, String)> = selectors
        .iter()
        .map(|s| resolve_task(store, s).map(|(idx, t)| (idx, t.id.clone())))
        .collect::<Result<_>>()?;

    let mut result = CmdResult::default();
    for (index, id) in resolved {
        let now = Utc::now();
        let task = store.update_task(&id, |t| t.toggle(now))?;
        result.add_message(CmdMessage::success(format!(
            "Task marked {} ({}): {}",
            task.status, index, task.title
        )));
        result.affected_tasks.push(DisplayTask { index, task });
    }
    Ok(result)
}
