use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::{encode_csv, export_filename};
use crate::filter::{filter_tasks, FilterCriteria};
use crate::store::{StorageBackend, TaskStore};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the CSV payload lands.
#[derive(Debug, Clone)]
pub enum ExportTarget {
    /// A dated file inside this directory.
    Dir(PathBuf),
    /// Exactly this path.
    File(PathBuf),
}

impl ExportTarget {
    fn resolve(&self, date: NaiveDate) -> PathBuf {
        match self {
            ExportTarget::Dir(dir) => dir.join(export_filename(date)),
            ExportTarget::File(path) => path.clone(),
        }
    }
}

/// Writes the filtered, sorted view as CSV.
pub fn run<B: StorageBackend>(
    store: &TaskStore<B>,
    criteria: &FilterCriteria,
    target: &ExportTarget,
    date: NaiveDate,
) -> Result<CmdResult> {
    let view = filter_tasks(store.tasks(), criteria);
    let payload = encode_csv(view.iter().copied(), store.categories());
    let path = target.resolve(date);
    write_payload(&path, &payload)?;
    debug!(path = %path.display(), rows = view.len(), "export written");

    let mut result = CmdResult {
        export_path: Some(path.clone()),
        ..Default::default()
    };
    result.add_message(CmdMessage::success(format!(
        "Exported {} task{} to {}",
        view.len(),
        if view.len() == 1 { "" } else { "s" },
        path.display()
    )));
    Ok(result)
}

fn write_payload(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, payload)?;
    Ok(())
}
