use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ClinicError, Result};
use crate::model::{parse_patient_id, Patient};
use crate::registry::PatientRegistry;
use crate::store::PatientStore;
use std::str::FromStr;

/// Which attribute a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    LastName,
    Id,
    InsuranceNumber,
    Phone,
}

impl FromStr for SearchField {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "last-name" | "name" => Ok(SearchField::LastName),
            "2" | "id" => Ok(SearchField::Id),
            "3" | "insurance" | "insurance-number" => Ok(SearchField::InsuranceNumber),
            "4" | "phone" => Ok(SearchField::Phone),
            other => Err(ClinicError::Validation(format!(
                "unknown search criterion {:?}",
                other
            ))),
        }
    }
}

/// Exact match for ids, case-insensitive substring match for everything else.
pub fn run<S: PatientStore>(
    registry: &PatientRegistry<S>,
    field: SearchField,
    term: &str,
) -> Result<CmdResult> {
    let found: Vec<Patient> = match field {
        SearchField::Id => {
            let id = parse_patient_id(term)?;
            registry.find_by_id(id).cloned().into_iter().collect()
        }
        SearchField::LastName => cloned(registry.find_by_last_name(term)),
        SearchField::InsuranceNumber => cloned(registry.find_by_insurance_number(term)),
        SearchField::Phone => cloned(registry.find_by_phone(term)),
    };

    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info("No patients found."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Patients found: {}",
            found.len()
        )));
    }
    Ok(result.with_listed_patients(found))
}

fn cloned(patients: Vec<&Patient>) -> Vec<Patient> {
    patients.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PatientDraft};
    use crate::store::memory::InMemoryStore;

    fn registry() -> PatientRegistry<InMemoryStore> {
        let mut registry = PatientRegistry::new(InMemoryStore::new());
        registry
            .add(PatientDraft {
                phone: "555-0100".into(),
                insurance_number: "OMS 7700".into(),
                ..PatientDraft::new("Smith", "John", Gender::Male)
            })
            .unwrap();
        registry
            .add(PatientDraft::new("Jones", "Mary", Gender::Female))
            .unwrap();
        registry
    }

    #[test]
    fn searches_each_field() {
        let registry = registry();
        let by_name = run(&registry, SearchField::LastName, "SM").unwrap();
        assert_eq!(by_name.listed_patients.len(), 1);

        let by_id = run(&registry, SearchField::Id, "2").unwrap();
        assert_eq!(by_id.listed_patients[0].last_name, "Jones");

        let by_insurance = run(&registry, SearchField::InsuranceNumber, "oms").unwrap();
        assert_eq!(by_insurance.listed_patients.len(), 1);

        let by_phone = run(&registry, SearchField::Phone, "0100").unwrap();
        assert_eq!(by_phone.listed_patients.len(), 1);
    }

    #[test]
    fn unknown_id_is_an_empty_result() {
        let result = run(&registry(), SearchField::Id, "99").unwrap();
        assert!(result.listed_patients.is_empty());
        assert_eq!(result.messages[0].content, "No patients found.");
    }

    #[test]
    fn malformed_id_is_rejected() {
        let result = run(&registry(), SearchField::Id, "two");
        assert!(matches!(result, Err(ClinicError::InvalidId(_))));
    }

    #[test]
    fn parses_menu_numbers_and_names() {
        assert_eq!("1".parse::<SearchField>().unwrap(), SearchField::LastName);
        assert_eq!("phone".parse::<SearchField>().unwrap(), SearchField::Phone);
        assert!("9".parse::<SearchField>().is_err());
    }
}
