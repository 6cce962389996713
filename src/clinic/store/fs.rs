use super::{decode_snapshot, encode_snapshot, PatientStore};
use crate::error::{ClinicError, Result};
use crate::model::Patient;
use std::cell::Cell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the whole roster in a single pretty-printed JSON file.
///
/// When the file cannot be read, the next save first copies it to
/// [`JsonFileStore::backup_path`] so the unreadable content is never lost.
pub struct JsonFileStore {
    path: PathBuf,
    unreadable: Cell<bool>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unreadable: Cell::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<snapshot>.bak`, next to the snapshot.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    fn back_up_unreadable(&self) -> std::io::Result<()> {
        if !self.unreadable.get() || !self.path.exists() {
            return Ok(());
        }
        let backup = self.backup_path();
        fs::copy(&self.path, &backup)?;
        tracing::warn!(backup = %backup.display(), "kept a copy of the unreadable roster");
        self.unreadable.set(false);
        Ok(())
    }

    fn load_error(&self, reason: impl ToString) -> ClinicError {
        ClinicError::Load {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn save_error(&self, reason: impl ToString) -> ClinicError {
        ClinicError::Save {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_atomically(&self, content: &str) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        // Same directory as the target so the rename never crosses filesystems.
        let tmp_file = dir.join(format!(".patients-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(e);
        }
        Ok(())
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Patient>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let decoded = fs::read_to_string(&self.path)
            .map_err(|e| self.load_error(e))
            .and_then(|content| decode_snapshot(&content).map_err(|e| self.load_error(e)));
        self.unreadable.set(decoded.is_err());
        let patients = decoded?;
        tracing::debug!(path = %self.path.display(), count = patients.len(), "loaded snapshot");
        Ok(patients)
    }

    fn save(&mut self, patients: &[Patient]) -> Result<()> {
        let content = encode_snapshot(patients).map_err(|e| self.save_error(e))?;
        self.back_up_unreadable().map_err(|e| self.save_error(e))?;
        self.write_atomically(&content)
            .map_err(|e| self.save_error(e))?;
        tracing::info!(path = %self.path.display(), count = patients.len(), "saved snapshot");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
