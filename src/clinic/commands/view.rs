use crate::commands::CmdResult;
use crate::error::{ClinicError, Result};
use crate::model::PatientId;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(registry: &PatientRegistry<S>, id: PatientId) -> Result<CmdResult> {
    let patient = registry
        .find_by_id(id)
        .cloned()
        .ok_or(ClinicError::PatientNotFound(id))?;
    Ok(CmdResult::default().with_listed_patients(vec![patient]))
}
