use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::notify::{NotificationSink, Permission};
use crate::reminder::evaluate;
use crate::store::{StorageBackend, TaskStore};
use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

/// One reminder pass: evaluate tasks due tomorrow and hand them to the sink.
///
/// Nothing is evaluated while the notification preference is off. Permission is
/// requested while still undecided; delivery happens only once granted.
pub fn run<B, S, Tz>(store: &TaskStore<B>, sink: &mut S, now: &DateTime<Tz>) -> Result<CmdResult>
where
    B: StorageBackend,
    S: NotificationSink,
    Tz: TimeZone,
{
    let mut result = CmdResult::default();
    if !store.notifications_enabled() {
        result.add_message(CmdMessage::info(
            "Notifications are off. Turn them on with `taskflow notifications on`.",
        ));
        return Ok(result);
    }

    let mut permission = sink.permission();
    if permission == Permission::Default {
        permission = sink.request_permission();
        debug!(?permission, "notification permission requested");
    }

    let reminders = evaluate(store.tasks(), now);
    if reminders.is_empty() {
        result.add_message(CmdMessage::info("No tasks due tomorrow."));
        return Ok(result);
    }

    if permission != Permission::Granted {
        result.add_message(CmdMessage::warning(format!(
            "Notification permission denied: {} reminder(s) not delivered.",
            reminders.len()
        )));
        result.reminders = reminders;
        return Ok(result);
    }

    let mut delivered = 0;
    for reminder in &reminders {
        match sink.deliver(&reminder.title, &reminder.body) {
            Ok(()) => {
                delivered += 1;
                info!(task = %reminder.task_id, "reminder delivered");
            }
            Err(e) => warn!(task = %reminder.task_id, error = %e, "reminder delivery failed"),
        }
    }
    result.add_message(CmdMessage::success(format!(
        "Delivered {} reminder(s).",
        delivered
    )));
    result.reminders = reminders;
    Ok(result)
}
