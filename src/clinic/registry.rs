//! # Patient Registry
//!
//! The in-memory authority over the clinic roster. A [`PatientRegistry`] owns
//! the ordered collection of [`Patient`]s and the [`PatientStore`] it was
//! opened from.
//!
//! ## Mutations
//!
//! `add`, `update` and `delete` are transactional: the registry builds the
//! next collection, asks the store to save it, and swaps it in only once the
//! save succeeds. A failed save returns the store's error and leaves the
//! roster exactly as it was.
//!
//! ## Ordering
//!
//! Stored order is insertion order and never changes. [`PatientRegistry::list_sorted`]
//! returns a sorted projection for display.

use crate::error::{ClinicError, Result};
use crate::model::{Patient, PatientDraft, PatientId, PatientUpdate};
use crate::stats::Stats;
use crate::store::PatientStore;
use chrono::Local;
use std::cmp::Ordering;
use std::fmt::Write;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub struct PatientRegistry<S: PatientStore> {
    store: S,
    patients: Vec<Patient>,
    timestamp_format: String,
    modified: bool,
}

impl<S: PatientStore> PatientRegistry<S> {
    /// An empty registry that has not read its store yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            patients: Vec::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            modified: false,
        }
    }

    /// Build a registry and read the store. A load failure is not fatal: the
    /// registry starts empty and the error is handed back for reporting.
    pub fn open(store: S) -> (Self, Option<ClinicError>) {
        let mut registry = Self::new(store);
        let error = registry.reload().err();
        (registry, error)
    }

    /// chrono format used to stamp `registration_date` on new patients.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// True once a mutation has been committed since the roster was last
    /// loaded or explicitly saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// 1 for an empty roster, otherwise one past the highest id in use.
    pub fn next_id(&self) -> PatientId {
        self.patients.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
    }

    pub fn add(&mut self, draft: PatientDraft) -> Result<Patient> {
        let patient = draft.into_patient(self.next_id(), self.registration_stamp()?)?;

        let mut next = self.patients.clone();
        next.push(patient.clone());
        self.commit(next)?;

        tracing::debug!(id = patient.id, "patient added");
        Ok(patient)
    }

    pub fn find_by_id(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn find_by_last_name(&self, term: &str) -> Vec<&Patient> {
        self.find_matching(term, |p| p.last_name.as_str())
    }

    pub fn find_by_insurance_number(&self, term: &str) -> Vec<&Patient> {
        self.find_matching(term, |p| p.insurance_number.as_str())
    }

    pub fn find_by_phone(&self, term: &str) -> Vec<&Patient> {
        self.find_matching(term, |p| p.phone.as_str())
    }

    fn find_matching<F>(&self, term: &str, field: F) -> Vec<&Patient>
    where
        F: Fn(&Patient) -> &str,
    {
        let needle = term.trim().to_lowercase();
        self.patients
            .iter()
            .filter(|p| field(p).to_lowercase().contains(&needle))
            .collect()
    }

    /// Apply the non-blank fields of `update` to patient `id`.
    pub fn update(&mut self, id: PatientId, update: &PatientUpdate) -> Result<Patient> {
        let position = self.position(id)?;

        let mut next = self.patients.clone();
        update.apply(&mut next[position]);
        let updated = next[position].clone();
        self.commit(next)?;

        tracing::debug!(id, "patient updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: PatientId) -> Result<Patient> {
        let position = self.position(id)?;

        let mut next = self.patients.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        tracing::debug!(id, "patient deleted");
        Ok(removed)
    }

    /// All patients ordered by last name; the stored order is left alone.
    pub fn list_sorted(&self) -> Vec<&Patient> {
        let mut sorted: Vec<&Patient> = self.patients.iter().collect();
        sorted.sort_by(|a, b| compare_names(&a.last_name, &b.last_name));
        sorted
    }

    pub fn statistics(&self) -> Stats {
        Stats::compute(&self.patients)
    }

    /// Write the current roster to the store. Returns the number of patients written.
    pub fn save(&mut self) -> Result<usize> {
        self.store.save(&self.patients)?;
        self.modified = false;
        Ok(self.patients.len())
    }

    /// Replace the roster with what the store holds. On failure the roster is
    /// emptied and the error returned.
    pub fn reload(&mut self) -> Result<usize> {
        self.modified = false;
        match self.store.load() {
            Ok(patients) => {
                self.patients = patients;
                tracing::debug!(count = self.patients.len(), "roster loaded");
                Ok(self.patients.len())
            }
            Err(e) => {
                tracing::debug!(error = %e, "could not load roster, starting empty");
                self.patients.clear();
                Err(e)
            }
        }
    }

    fn registration_stamp(&self) -> Result<String> {
        let mut stamp = String::new();
        write!(stamp, "{}", Local::now().format(&self.timestamp_format)).map_err(|_| {
            ClinicError::Config(format!(
                "invalid timestamp format {:?}",
                self.timestamp_format
            ))
        })?;
        Ok(stamp)
    }

    fn position(&self, id: PatientId) -> Result<usize> {
        self.patients
            .iter()
            .position(|p| p.id == id)
            .ok_or(ClinicError::PatientNotFound(id))
    }

    fn commit(&mut self, next: Vec<Patient>) -> Result<()> {
        self.store.save(&next)?;
        self.patients = next;
        self.modified = true;
        Ok(())
    }
}

/// Case-insensitive name ordering that files "ё" under "е", as Russian
/// dictionaries do. Falls back to the raw text so the order is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}
