//! Explicit snapshot writes and reads, outside of the automatic save that
//! follows every change.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn save<S: PatientStore>(registry: &mut PatientRegistry<S>) -> Result<CmdResult> {
    let count = registry.save()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Data saved. Total patients: {}",
        count
    )));
    Ok(result)
}

/// Re-read the snapshot. An unreadable snapshot is reported as a warning and
/// leaves the roster empty.
pub fn reload<S: PatientStore>(registry: &mut PatientRegistry<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match registry.reload() {
        Ok(count) => result.add_message(CmdMessage::success(format!(
            "Loaded {} patients from {}",
            count,
            registry.store().location().display()
        ))),
        Err(e) if e.is_load() => result.add_message(CmdMessage::warning(format!(
            "{}. Continuing with an empty roster.",
            e
        ))),
        Err(e) => return Err(e),
    }
    Ok(result)
}
