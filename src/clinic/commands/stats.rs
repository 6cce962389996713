use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(registry: &PatientRegistry<S>) -> Result<CmdResult> {
    let stats = registry.statistics();

    let mut result = CmdResult::default();
    if stats.total == 0 {
        result.add_message(CmdMessage::info("No data for statistics."));
    }
    Ok(result.with_stats(stats))
}
