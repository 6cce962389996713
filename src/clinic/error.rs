use crate::model::PatientId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Invalid patient id {0:?}: expected a positive whole number")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to load patients from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Failed to save patients to {}: {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClinicError {
    /// True for failures of the snapshot read, which callers may recover
    /// from by continuing with an empty collection.
    pub fn is_load(&self) -> bool {
        matches!(self, ClinicError::Load { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClinicError>;
