use crate::commands::CmdResult;
use crate::error::Result;
use crate::stats::calculate_statistics;
use crate::store::{StorageBackend, TaskStore};
use chrono::{DateTime, TimeZone};

pub fn run<B: StorageBackend, Tz: TimeZone>(
    store: &TaskStore<B>,
    now: &DateTime<Tz>,
) -> Result<CmdResult> {
    let statistics = calculate_statistics(store.tasks(), now);
    Ok(CmdResult::default().with_statistics(statistics))
}
