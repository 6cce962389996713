use crate::error::{ClinicError, Result};
use crate::registry::DEFAULT_TIMESTAMP_FORMAT;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "patients.json";

pub const KEY_DATA_FILE: &str = "data-file";
pub const KEY_TIMESTAMP_FORMAT: &str = "timestamp-format";

/// Configuration for the clinic registry, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Snapshot file, relative to the data directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// chrono format for `registration_date`
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl ClinicConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ClinicError::Io)?;
        let config: ClinicConfig =
            serde_json::from_str(&content).map_err(ClinicError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ClinicError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ClinicError::Serialization)?;
        fs::write(config_path, content).map_err(ClinicError::Io)?;
        Ok(())
    }

    /// Full path of the snapshot file.
    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        // join() keeps an absolute data_file as is
        data_dir.join(&self.data_file)
    }

    pub fn keys() -> &'static [&'static str] {
        &[KEY_DATA_FILE, KEY_TIMESTAMP_FORMAT]
    }

    /// Keys are written with dashes; the snake_case field names are accepted too.
    pub fn get(&self, key: &str) -> Option<&str> {
        match canonical_key(key).as_str() {
            KEY_DATA_FILE => Some(&self.data_file),
            KEY_TIMESTAMP_FORMAT => Some(&self.timestamp_format),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match canonical_key(key).as_str() {
            KEY_DATA_FILE => {
                if value.is_empty() {
                    return Err(ClinicError::Config("data-file cannot be empty".into()));
                }
                self.data_file = value.to_string();
            }
            KEY_TIMESTAMP_FORMAT => {
                let invalid = value.is_empty()
                    || StrftimeItems::new(value).any(|item| matches!(item, Item::Error));
                if invalid {
                    return Err(ClinicError::Config(format!(
                        "invalid timestamp format {:?}",
                        value
                    )));
                }
                self.timestamp_format = value.to_string();
            }
            _ => {
                return Err(ClinicError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClinicConfig::default();
        assert_eq!(config.data_file, "patients.json");
        assert_eq!(config.timestamp_format, "%d.%m.%Y %H:%M");
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = ClinicConfig::load(temp.path()).unwrap();
        assert_eq!(config, ClinicConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let mut config = ClinicConfig::default();
        config.set(KEY_DATA_FILE, "roster.json").unwrap();
        config.save(&dir).unwrap();

        let loaded = ClinicConfig::load(&dir).unwrap();
        assert_eq!(loaded.data_file, "roster.json");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let parsed: ClinicConfig = serde_json::from_str(r#"{"data_file": "x.json"}"#).unwrap();
        assert_eq!(parsed.data_file, "x.json");
        assert_eq!(parsed.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_data_path() {
        let config = ClinicConfig::default();
        let dir = Path::new("/var/clinic");
        assert_eq!(config.data_path(dir), dir.join("patients.json"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ClinicConfig::default();
        assert!(config.set(KEY_TIMESTAMP_FORMAT, "%d.%m %Q").is_err());
        assert!(config.set(KEY_DATA_FILE, "  ").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, ClinicConfig::default());

        config.set(KEY_TIMESTAMP_FORMAT, "%Y-%m-%d").unwrap();
        assert_eq!(config.get(KEY_TIMESTAMP_FORMAT), Some("%Y-%m-%d"));
    }

    #[test]
    fn accepts_snake_case_keys() {
        let mut config = ClinicConfig::default();
        config.set("data_file", "roster.json").unwrap();
        config.set("timestamp_format", "%Y-%m-%d").unwrap();

        assert_eq!(config.get("data_file"), Some("roster.json"));
        assert_eq!(config.get(KEY_DATA_FILE), Some("roster.json"));
        assert_eq!(config.get("timestamp_format"), Some("%Y-%m-%d"));
        assert!(config.set("data.file", "x").is_err());
    }
}
