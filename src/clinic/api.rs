//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every clinic operation, whichever UI is driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (operator-typed ids become [`PatientId`](crate::model::PatientId)s, search
//!   criteria become [`SearchField`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic (that is `registry.rs`), and no I/O or
//! formatting (that is the CLI).
//!
//! ## Generic Over PatientStore
//!
//! `ClinicApi<S: PatientStore>` is generic over the storage backend:
//! - Production: `ClinicApi<JsonFileStore>`
//! - Testing: `ClinicApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{parse_patient_id, PatientDraft, PatientUpdate};
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

/// The main API facade for clinic operations.
pub struct ClinicApi<S: PatientStore> {
    registry: PatientRegistry<S>,
    paths: commands::ClinicPaths,
}

impl<S: PatientStore> ClinicApi<S> {
    pub fn new(registry: PatientRegistry<S>, paths: commands::ClinicPaths) -> Self {
        Self { registry, paths }
    }

    pub fn list_patients(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.registry)
    }

    pub fn add_patient(&mut self, draft: PatientDraft) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.registry, draft)
    }

    pub fn view_patient(&self, id: &str) -> Result<commands::CmdResult> {
        let id = parse_patient_id(id)?;
        commands::view::run(&self.registry, id)
    }

    pub fn find_patients(&self, field: SearchField, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.registry, field, term)
    }

    pub fn update_patient(
        &mut self,
        id: &str,
        update: &PatientUpdate,
    ) -> Result<commands::CmdResult> {
        let id = parse_patient_id(id)?;
        commands::update::run(&mut self.registry, id, update)
    }

    pub fn delete_patient(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = parse_patient_id(id)?;
        commands::delete::run(&mut self.registry, id)
    }

    pub fn statistics(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.registry)
    }

    pub fn save(&mut self) -> Result<commands::CmdResult> {
        commands::storage::save(&mut self.registry)
    }

    pub fn reload(&mut self) -> Result<commands::CmdResult> {
        commands::storage::reload(&mut self.registry)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn registry(&self) -> &PatientRegistry<S> {
        &self.registry
    }

    pub fn paths(&self) -> &commands::ClinicPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::search::SearchField;
pub use commands::{ClinicPaths, CmdMessage, CmdResult, MessageLevel};
