//! # Storage Layer
//!
//! The registry never touches the filesystem itself. It holds a [`PatientStore`]
//! and hands it the whole collection after every change.
//!
//! ## Snapshot Model
//!
//! Storage is snapshot-based: `load` returns every patient, `save` replaces
//! every patient. There are no row-level writes, so a store only has to make
//! one thing atomic: swapping the old snapshot for the new one.
//!
//! The encoding lives in [`encode_snapshot`] / [`decode_snapshot`] so that every
//! store writes the same bytes:
//!
//! ```text
//! [
//!   {
//!     "id": 1,
//!     "last_name": "Petrov",
//!     "middle_name": null,
//!     "gender": "Male",
//!     ...
//!   }
//! ]
//! ```
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: production store, one JSON file written via
//!   temp-file-and-rename.
//! - [`memory::InMemoryStore`]: keeps the encoded snapshot in memory; can be
//!   told to fail writes or to hold a corrupt snapshot.

use crate::error::Result;
use crate::model::Patient;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Durable home of the patient collection.
pub trait PatientStore {
    /// Read the last snapshot. A store that has never been written is empty.
    fn load(&self) -> Result<Vec<Patient>>;

    /// Replace the snapshot with `patients`.
    fn save(&mut self, patients: &[Patient]) -> Result<()>;

    /// Where the snapshot lives, for messages.
    fn location(&self) -> PathBuf;
}

pub fn encode_snapshot(patients: &[Patient]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(patients)
}

pub fn decode_snapshot(content: &str) -> serde_json::Result<Vec<Patient>> {
    serde_json::from_str(content)
}
