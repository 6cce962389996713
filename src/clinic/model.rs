use crate::error::{ClinicError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type PatientId = u32;

/// Parse an id typed by an operator. Anything but a positive whole number is
/// an [`ClinicError::InvalidId`], kept distinct from "no such patient".
pub fn parse_patient_id(input: &str) -> Result<PatientId> {
    match input.trim().parse::<PatientId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ClinicError::InvalidId(input.trim().to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    // Aliases keep snapshots written by the earlier Russian-language tool readable.
    #[serde(alias = "Мужской")]
    Male,
    #[serde(alias = "Женский")]
    Female,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "m" | "male" | "мужской" => Ok(Gender::Male),
            "2" | "f" | "female" | "женский" => Ok(Gender::Female),
            other => Err(ClinicError::Validation(format!(
                "unknown gender {:?} (expected male or female)",
                other
            ))),
        }
    }
}

/// A stored patient record. Field names are the on-disk snapshot keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub birth_date: String,
    pub gender: Gender,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub insurance_number: String,
    pub registration_date: String,
    pub medical_history: String,
    pub diagnosis: String,
    pub attending_doctor: String,
}

impl Patient {
    /// "Last First Middle", skipping an absent middle name.
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.last_name, self.first_name, middle),
            None => format!("{} {}", self.last_name, self.first_name),
        }
    }

    /// "Last F.M." as shown in the roster table.
    pub fn short_name(&self) -> String {
        let initials: String = std::iter::once(&self.first_name)
            .chain(self.middle_name.as_ref())
            .filter_map(|part| part.chars().next())
            .map(|c| format!("{}.", c))
            .collect();
        if initials.is_empty() {
            self.last_name.clone()
        } else {
            format!("{} {}", self.last_name, initials)
        }
    }

    /// Current value of an editable field, as text.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::LastName => &self.last_name,
            Field::FirstName => &self.first_name,
            Field::MiddleName => self.middle_name.as_deref().unwrap_or(""),
            Field::BirthDate => &self.birth_date,
            Field::Gender => self.gender.label(),
            Field::Address => &self.address,
            Field::Phone => &self.phone,
            Field::Email => self.email.as_deref().unwrap_or(""),
            Field::InsuranceNumber => &self.insurance_number,
            Field::MedicalHistory => &self.medical_history,
            Field::Diagnosis => &self.diagnosis,
            Field::AttendingDoctor => &self.attending_doctor,
        }
    }
}

/// Every field an operator may change after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LastName,
    FirstName,
    MiddleName,
    BirthDate,
    Gender,
    Address,
    Phone,
    Email,
    InsuranceNumber,
    MedicalHistory,
    Diagnosis,
    AttendingDoctor,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::LastName => "Last name",
            Field::FirstName => "First name",
            Field::MiddleName => "Middle name",
            Field::BirthDate => "Birth date (DD.MM.YYYY)",
            Field::Gender => "Gender",
            Field::Address => "Address",
            Field::Phone => "Phone",
            Field::Email => "Email",
            Field::InsuranceNumber => "Insurance number",
            Field::MedicalHistory => "Medical history",
            Field::Diagnosis => "Diagnosis",
            Field::AttendingDoctor => "Attending doctor",
        }
    }
}

/// Groups of fields offered together when editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Personal,
    Contacts,
    Medical,
    All,
}

impl FieldGroup {
    pub fn fields(&self) -> &'static [Field] {
        const PERSONAL: &[Field] = &[
            Field::LastName,
            Field::FirstName,
            Field::MiddleName,
            Field::BirthDate,
            Field::Gender,
        ];
        const CONTACTS: &[Field] = &[
            Field::Address,
            Field::Phone,
            Field::Email,
            Field::InsuranceNumber,
        ];
        const MEDICAL: &[Field] = &[
            Field::MedicalHistory,
            Field::Diagnosis,
            Field::AttendingDoctor,
        ];
        const ALL: &[Field] = &[
            Field::LastName,
            Field::FirstName,
            Field::MiddleName,
            Field::BirthDate,
            Field::Gender,
            Field::Address,
            Field::Phone,
            Field::Email,
            Field::InsuranceNumber,
            Field::MedicalHistory,
            Field::Diagnosis,
            Field::AttendingDoctor,
        ];

        match self {
            FieldGroup::Personal => PERSONAL,
            FieldGroup::Contacts => CONTACTS,
            FieldGroup::Medical => MEDICAL,
            FieldGroup::All => ALL,
        }
    }
}

/// Caller-supplied data for a new patient. Nothing is checked until the
/// registry turns it into a [`Patient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub birth_date: String,
    pub gender: Option<Gender>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub insurance_number: String,
    pub medical_history: String,
    pub diagnosis: String,
    pub attending_doctor: String,
}

impl PatientDraft {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            gender: Some(gender),
            ..Self::default()
        }
    }

    pub(crate) fn into_patient(
        self,
        id: PatientId,
        registration_date: String,
    ) -> Result<Patient> {
        let last_name = required(&self.last_name, "last name")?;
        let first_name = required(&self.first_name, "first name")?;
        let gender = self
            .gender
            .ok_or_else(|| ClinicError::Validation("gender is required".to_string()))?;

        Ok(Patient {
            id,
            last_name,
            first_name,
            middle_name: optional(self.middle_name.as_deref()),
            birth_date: self.birth_date.trim().to_string(),
            gender,
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: optional(self.email.as_deref()),
            insurance_number: self.insurance_number.trim().to_string(),
            registration_date,
            medical_history: self.medical_history.trim().to_string(),
            diagnosis: self.diagnosis.trim().to_string(),
            attending_doctor: self.attending_doctor.trim().to_string(),
        })
    }
}

fn required(value: &str, name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClinicError::Validation(format!("{} cannot be empty", name)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A partial edit. `None` and blank values both mean "keep what is there",
/// so an edit can never clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientUpdate {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub insurance_number: Option<String>,
    pub medical_history: Option<String>,
    pub diagnosis: Option<String>,
    pub attending_doctor: Option<String>,
}

impl PatientUpdate {
    /// Set a text field. Gender is set through [`PatientUpdate::gender`]
    /// directly, so a text value for it is parsed.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let slot = match field {
            Field::LastName => &mut self.last_name,
            Field::FirstName => &mut self.first_name,
            Field::MiddleName => &mut self.middle_name,
            Field::BirthDate => &mut self.birth_date,
            Field::Gender => {
                if !value.trim().is_empty() {
                    self.gender = Some(value.parse()?);
                }
                return Ok(());
            }
            Field::Address => &mut self.address,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::InsuranceNumber => &mut self.insurance_number,
            Field::MedicalHistory => &mut self.medical_history,
            Field::Diagnosis => &mut self.diagnosis,
            Field::AttendingDoctor => &mut self.attending_doctor,
        };
        *slot = Some(value);
        Ok(())
    }

    /// True when applying this update would leave any patient unchanged.
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && [
                &self.last_name,
                &self.first_name,
                &self.middle_name,
                &self.birth_date,
                &self.address,
                &self.phone,
                &self.email,
                &self.insurance_number,
                &self.medical_history,
                &self.diagnosis,
                &self.attending_doctor,
            ]
            .iter()
            .all(|v| optional(v.as_deref()).is_none())
    }

    pub(crate) fn apply(&self, patient: &mut Patient) {
        replace(&mut patient.last_name, &self.last_name);
        replace(&mut patient.first_name, &self.first_name);
        if let Some(middle) = optional(self.middle_name.as_deref()) {
            patient.middle_name = Some(middle);
        }
        replace(&mut patient.birth_date, &self.birth_date);
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        replace(&mut patient.address, &self.address);
        replace(&mut patient.phone, &self.phone);
        if let Some(email) = optional(self.email.as_deref()) {
            patient.email = Some(email);
        }
        replace(&mut patient.insurance_number, &self.insurance_number);
        replace(&mut patient.medical_history, &self.medical_history);
        replace(&mut patient.diagnosis, &self.diagnosis);
        replace(&mut patient.attending_doctor, &self.attending_doctor);
    }
}

fn replace(target: &mut String, value: &Option<String>) {
    if let Some(v) = optional(value.as_deref()) {
        *target = v;
    }
}
