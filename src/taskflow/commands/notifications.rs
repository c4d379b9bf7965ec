use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{StorageBackend, TaskStore};

fn describe(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Reports the reminder preference, or sets it when `enabled` is given.
pub fn run<B: StorageBackend>(store: &mut TaskStore<B>, enabled: Option<bool>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match enabled {
        None => result.add_message(CmdMessage::info(format!(
            "Notifications are {}",
            describe(store.notifications_enabled())
        ))),
        Some(enabled) => {
            store.set_notifications_enabled(enabled)?;
            result.add_message(CmdMessage::success(format!(
                "Notifications turned {}",
                describe(enabled)
            )));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn defaults_to_on_and_persists_changes() {
        let mut store = TaskStore::open(MemBackend::new());
        let result = run(&mut store, None).unwrap();
        assert_eq!(result.messages[0].content, "Notifications are on");

        run(&mut store, Some(false)).unwrap();
        assert!(!store.notifications_enabled());
    }

    #[test]
    fn write_failure_propagates() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = TaskStore::open(backend);
        assert!(run(&mut store, Some(false)).is_err());
    }
}
