use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PatientId;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(registry: &mut PatientRegistry<S>, id: PatientId) -> Result<CmdResult> {
    let patient = registry.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Patient deleted ({}): {}",
        patient.id,
        patient.full_name()
    )));
    Ok(result.with_affected_patients(vec![patient]))
}
