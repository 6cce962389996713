use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PatientDraft;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(
    registry: &mut PatientRegistry<S>,
    draft: PatientDraft,
) -> Result<CmdResult> {
    let patient = registry.add(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Patient added (ID: {}): {}",
        patient.id,
        patient.full_name()
    )));
    Ok(result.with_affected_patients(vec![patient]))
}
