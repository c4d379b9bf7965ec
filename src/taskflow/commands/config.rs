use crate::commands::{CmdMessage, CmdResult};
use crate::config::{TaskflowConfig, KEYS};
use crate::error::{Result, TaskflowError};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = TaskflowConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            for key in KEYS {
                let value = config.get(key).unwrap_or_default();
                result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
            }
            result = result.with_config(config);
        }
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| TaskflowError::Config(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
            result = result.with_config(config);
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(data_dir)?;
            let shown = config.get(&key).unwrap_or_default();
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            result = result.with_config(config);
        }
    }

    Ok(result)
}
