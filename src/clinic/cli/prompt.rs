//! Line-oriented prompting over any reader/writer pair, so the interactive
//! flows can be driven from tests with an in-memory script.

use clinic::error::{ClinicError, Result};
use clinic::model::{Field, FieldGroup, Gender, Patient, PatientDraft, PatientUpdate};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask for one line. The answer comes back trimmed; end of input is an
    /// `UnexpectedEof` I/O error.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ClinicError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is not blank.
    pub fn ask_required(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.ask(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("This field is required.")?;
        }
    }

    /// Show the current value; a blank answer means keep it.
    pub fn ask_with_default(&mut self, label: &str, current: &str) -> Result<String> {
        self.ask(&format!("{} [{}]", label, current))
    }

    pub fn select_gender(&mut self) -> Result<Gender> {
        loop {
            self.say("Gender:\n  1 - Male\n  2 - Female")?;
            match self.ask("Your choice")?.parse::<Gender>() {
                Ok(gender) => return Ok(gender),
                Err(_) => self.say("Invalid choice. Try again.")?,
            }
        }
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/n)", question))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes" | "д" | "да"))
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

pub fn is_end_of_input(err: &ClinicError) -> bool {
    matches!(err, ClinicError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Walk the operator through every field of a new patient.
pub fn prompt_draft<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<PatientDraft> {
    prompter.say("New patient")?;
    Ok(PatientDraft {
        last_name: prompter.ask_required(Field::LastName.label())?,
        first_name: prompter.ask_required(Field::FirstName.label())?,
        middle_name: Some(prompter.ask("Middle name (optional)")?),
        birth_date: prompter.ask(Field::BirthDate.label())?,
        gender: Some(prompter.select_gender()?),
        address: prompter.ask(Field::Address.label())?,
        phone: prompter.ask(Field::Phone.label())?,
        email: Some(prompter.ask("Email (optional)")?),
        insurance_number: prompter.ask(Field::InsuranceNumber.label())?,
        medical_history: prompter.ask(Field::MedicalHistory.label())?,
        diagnosis: prompter.ask(Field::Diagnosis.label())?,
        attending_doctor: prompter.ask(Field::AttendingDoctor.label())?,
    })
}

pub fn prompt_group<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<FieldGroup> {
    prompter.say(
        "What do you want to edit?\n  1 - Personal data\n  2 - Contacts\n  3 - Medical data\n  4 - Everything",
    )?;
    match prompter.ask("Your choice")?.as_str() {
        "1" => Ok(FieldGroup::Personal),
        "2" => Ok(FieldGroup::Contacts),
        "3" => Ok(FieldGroup::Medical),
        "4" => Ok(FieldGroup::All),
        other => Err(ClinicError::Validation(format!(
            "unknown field group {:?}",
            other
        ))),
    }
}

/// Ask for each field of `group`, showing current values. Gender is only
/// offered after a yes/no question.
pub fn prompt_update<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    patient: &Patient,
    group: FieldGroup,
) -> Result<PatientUpdate> {
    prompter.say("Press Enter to keep the current value.")?;
    let mut update = PatientUpdate::default();

    for field in group.fields() {
        if *field == Field::Gender {
            let question = format!("Change gender (currently {})?", patient.gender);
            if prompter.confirm(&question)? {
                update.gender = Some(prompter.select_gender()?);
            }
            continue;
        }
        let value = prompter.ask_with_default(field.label(), patient.field_value(*field))?;
        update.set(*field, value)?;
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn written(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output().clone()).unwrap()
    }

    #[test]
    fn ask_trims_and_reports_eof() {
        let mut p = prompter("  hello \n");
        assert_eq!(p.ask("Name").unwrap(), "hello");
        let err = p.ask("Again").unwrap_err();
        assert!(is_end_of_input(&err));
        assert!(written(&p).contains("Name: "));
    }

    #[test]
    fn gender_selection_retries() {
        let mut p = prompter("3\nx\n2\n");
        assert_eq!(p.select_gender().unwrap(), Gender::Female);
        assert_eq!(written(&p).matches("Invalid choice").count(), 2);
    }

    #[test]
    fn confirm_accepts_yes_forms() {
        let mut p = prompter("Y\nyes\nn\n\n");
        assert!(p.confirm("Sure?").unwrap());
        assert!(p.confirm("Sure?").unwrap());
        assert!(!p.confirm("Sure?").unwrap());
        assert!(!p.confirm("Sure?").unwrap());
    }

    #[test]
    fn draft_collects_every_field() {
        let script = "Smith\n\nAnna\n\n01.02.1980\n2\nMain st\n555\n\nINS-1\nnone\nflu\nDr. Grey\n";
        let mut p = prompter(script);
        let draft = prompt_draft(&mut p).unwrap();

        assert_eq!(draft.last_name, "Smith");
        // blank first name was re-asked
        assert_eq!(draft.first_name, "Anna");
        assert_eq!(draft.gender, Some(Gender::Female));
        assert_eq!(draft.email.as_deref(), Some(""));
        assert_eq!(draft.attending_doctor, "Dr. Grey");
        assert!(written(&p).contains("This field is required."));
    }

    #[test]
    fn update_keeps_blanks_and_asks_before_gender() {
        let patient = Patient {
            id: 1,
            last_name: "Smith".into(),
            first_name: "Anna".into(),
            middle_name: None,
            birth_date: "01.02.1980".into(),
            gender: Gender::Female,
            address: String::new(),
            phone: String::new(),
            email: None,
            insurance_number: String::new(),
            registration_date: String::new(),
            medical_history: String::new(),
            diagnosis: String::new(),
            attending_doctor: String::new(),
        };

        let mut p = prompter("Jones\n\n\n\nn\n");
        let update = prompt_update(&mut p, &patient, FieldGroup::Personal).unwrap();

        assert_eq!(update.last_name.as_deref(), Some("Jones"));
        assert_eq!(update.gender, None);
        assert!(written(&p).contains("Last name [Smith]"));

        let mut p = prompter("\n\n\n\ny\n1\n");
        let update = prompt_update(&mut p, &patient, FieldGroup::Personal).unwrap();
        assert_eq!(update.gender, Some(Gender::Male));
    }

    #[test]
    fn unknown_group_is_rejected() {
        let mut p = prompter("9\n");
        assert!(matches!(
            prompt_group(&mut p),
            Err(ClinicError::Validation(_))
        ));
    }
}
