use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::registry::PatientRegistry;
use crate::store::PatientStore;

pub fn run<S: PatientStore>(registry: &PatientRegistry<S>) -> Result<CmdResult> {
    let listed: Vec<_> = registry.list_sorted().into_iter().cloned().collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No patients registered."));
    }
    Ok(result.with_listed_patients(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PatientDraft};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_by_last_name() {
        let mut registry = PatientRegistry::new(InMemoryStore::new());
        for name in ["Smith", "Adams"] {
            registry
                .add(PatientDraft::new(name, "X", Gender::Male))
                .unwrap();
        }

        let result = run(&registry).unwrap();
        assert_eq!(result.listed_patients[0].last_name, "Adams");
        assert_eq!(result.listed_patients[1].last_name, "Smith");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_roster_gets_a_note() {
        let registry = PatientRegistry::new(InMemoryStore::new());
        let result = run(&registry).unwrap();
        assert!(result.listed_patients.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
