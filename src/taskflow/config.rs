//! # Configuration
//!
//! Settings live in `config.json` inside the data directory and fall back to
//! compiled defaults for anything missing.
//!
//! | Key                 | Default | Description                                   |
//! |---------------------|---------|-----------------------------------------------|
//! | `reminder-interval` | `3600`  | Seconds between reminder checks in `watch`    |
//! | `export-dir`        | unset   | Directory for CSV exports (current dir if unset) |

use crate::error::{Result, TaskflowError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 3600;

pub const KEYS: [&str; 2] = ["reminder-interval", "export-dir"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskflowConfig {
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_reminder_interval() -> u64 {
    DEFAULT_REMINDER_INTERVAL_SECS
}

impl Default for TaskflowConfig {
    fn default() -> Self {
        Self {
            reminder_interval_secs: DEFAULT_REMINDER_INTERVAL_SECS,
            export_dir: None,
        }
    }
}

impl TaskflowConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TaskflowConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }

    /// Where exports go: the configured directory, or `cwd`.
    pub fn export_dir_or(&self, cwd: &Path) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| cwd.to_path_buf())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "reminder-interval" => Some(self.reminder_interval_secs.to_string()),
            "export-dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "reminder-interval" => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    TaskflowError::Config(format!(
                        "reminder-interval must be a whole number of seconds, got '{}'",
                        value
                    ))
                })?;
                if secs == 0 {
                    return Err(TaskflowError::Config(
                        "reminder-interval must be at least 1 second".to_string(),
                    ));
                }
                self.reminder_interval_secs = secs;
            }
            "export-dir" => {
                let trimmed = value.trim();
                self.export_dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            other => {
                return Err(TaskflowError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaskflowConfig::default();
        assert_eq!(config.reminder_interval(), Duration::from_secs(3600));
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskflowConfig::load(dir.path()).unwrap();
        assert_eq!(config, TaskflowConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TaskflowConfig::default();
        config.set("reminder-interval", "60").unwrap();
        config.set("export-dir", "/tmp/exports").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = TaskflowConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.reminder_interval_secs, 60);
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();
        let config = TaskflowConfig::load(dir.path()).unwrap();
        assert_eq!(config, TaskflowConfig::default());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TaskflowConfig::default();
        assert!(config.set("reminder-interval", "soon").is_err());
        assert!(config.set("reminder-interval", "0").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, TaskflowConfig::default());
    }

    #[test]
    fn test_empty_export_dir_unsets() {
        let mut config = TaskflowConfig::default();
        config.set("export-dir", "out").unwrap();
        config.set("export-dir", "").unwrap();
        assert_eq!(config.get("export-dir").as_deref(), Some(""));
        assert_eq!(
            config.export_dir_or(Path::new("/work")),
            PathBuf::from("/work")
        );
    }
}
