use crate::commands::{ClinicPaths, CmdMessage, CmdResult};
use crate::config::ClinicConfig;
use crate::error::{ClinicError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &ClinicPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ClinicConfig::load(&paths.data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| ClinicError::Config(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
            return Ok(result);
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.data_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                config.get(&key).unwrap_or_default()
            )));
        }
    }

    Ok(result.with_config(config))
}
