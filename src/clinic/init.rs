use crate::api::{ClinicApi, ClinicPaths};
use crate::config::ClinicConfig;
use crate::error::{ClinicError, Result};
use crate::registry::PatientRegistry;
use crate::store::fs::JsonFileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the data directory; mostly used to isolate tests.
pub const DATA_DIR_ENV: &str = "CLINIC_DATA_DIR";

pub struct ClinicContext {
    pub api: ClinicApi<JsonFileStore>,
    pub config: ClinicConfig,
    /// Set when the snapshot could not be read and the roster started empty.
    pub load_error: Option<ClinicError>,
}

/// Pick the data directory: an explicit path first, then `CLINIC_DATA_DIR`,
/// then the OS-appropriate data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "clinic", "clinic")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ClinicError::Config("Could not determine a data directory".to_string()))
}

/// Load config, open the snapshot and wire up the API.
///
/// `data_file` replaces the configured snapshot path when given.
pub fn initialize(data_dir: &Path, data_file: Option<&Path>) -> ClinicContext {
    let config = ClinicConfig::load(data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        ClinicConfig::default()
    });

    let data_path = data_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.data_path(data_dir));
    tracing::debug!(path = %data_path.display(), "opening patient roster");

    let (registry, load_error) = PatientRegistry::open(JsonFileStore::new(data_path));
    let registry = registry.with_timestamp_format(config.timestamp_format.clone());

    let paths = ClinicPaths {
        data_dir: data_dir.to_path_buf(),
    };
    let api = ClinicApi::new(registry, paths);

    ClinicContext {
        api,
        config,
        load_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KEY_DATA_FILE;
    use crate::model::{Gender, PatientDraft};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = PathBuf::from("/tmp/clinic-explicit");
        assert_eq!(resolve_data_dir(Some(&dir)).unwrap(), dir);
    }

    #[test]
    fn uses_configured_data_file() {
        let temp = TempDir::new().unwrap();
        let mut config = ClinicConfig::default();
        config.set(KEY_DATA_FILE, "roster.json").unwrap();
        config.save(temp.path()).unwrap();

        let mut ctx = initialize(temp.path(), None);
        assert!(ctx.load_error.is_none());
        ctx.api
            .add_patient(PatientDraft::new("Smith", "John", Gender::Male))
            .unwrap();

        assert!(temp.path().join("roster.json").exists());
        assert!(!temp.path().join("patients.json").exists());
    }

    #[test]
    fn corrupt_snapshot_starts_empty_with_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("patients.json"), "not json").unwrap();

        let ctx = initialize(temp.path(), None);
        assert!(ctx.load_error.map(|e| e.is_load()).unwrap_or(false));
        assert!(ctx.api.registry().is_empty());
    }

    #[test]
    fn data_file_override() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("elsewhere").join("list.json");

        let mut ctx = initialize(temp.path(), Some(&file));
        ctx.api
            .add_patient(PatientDraft::new("Smith", "John", Gender::Male))
            .unwrap();
        assert!(file.exists());
    }
}
