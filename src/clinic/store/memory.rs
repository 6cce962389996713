use super::{decode_snapshot, encode_snapshot, PatientStore};
use crate::error::{ClinicError, Result};
use crate::model::Patient;
use std::path::PathBuf;

const LOCATION: &str = "memory://patients.json";

/// In-memory store for tests.
///
/// Keeps the encoded snapshot rather than the records themselves, so the
/// codec is exercised exactly as the file store exercises it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Option<String>,
    simulate_write_error: bool,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose snapshot already holds `patients`.
    pub fn with_patients(patients: &[Patient]) -> Self {
        Self {
            snapshot: encode_snapshot(patients).ok(),
            ..Self::default()
        }
    }

    /// A store holding text that is not a valid snapshot.
    pub fn corrupted(content: impl Into<String>) -> Self {
        Self {
            snapshot: Some(content.into()),
            ..Self::default()
        }
    }

    /// Make every following `save` fail.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl PatientStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Patient>> {
        match &self.snapshot {
            None => Ok(Vec::new()),
            Some(content) => decode_snapshot(content).map_err(|e| ClinicError::Load {
                path: PathBuf::from(LOCATION),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&mut self, patients: &[Patient]) -> Result<()> {
        if self.simulate_write_error {
            return Err(ClinicError::Save {
                path: PathBuf::from(LOCATION),
                reason: "Simulated write error".to_string(),
            });
        }
        let content = encode_snapshot(patients).map_err(|e| ClinicError::Save {
            path: PathBuf::from(LOCATION),
            reason: e.to_string(),
        })?;
        self.snapshot = Some(content);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(LOCATION)
    }
}
