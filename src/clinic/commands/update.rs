use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ClinicError, Result};
use crate::model::{PatientId, PatientUpdate};
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(
    registry: &mut PatientRegistry<S>,
    id: PatientId,
    update: &PatientUpdate,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if update.is_empty() {
        let patient = registry
            .find_by_id(id)
            .cloned()
            .ok_or(ClinicError::PatientNotFound(id))?;
        result.add_message(CmdMessage::info(format!(
            "Nothing to change for patient {}.",
            id
        )));
        return Ok(result.with_affected_patients(vec![patient]));
    }

    let patient = registry.update(id, update)?;
    result.add_message(CmdMessage::success(format!(
        "Patient updated ({}): {}",
        patient.id,
        patient.full_name()
    )));
    Ok(result.with_affected_patients(vec![patient]))
}
