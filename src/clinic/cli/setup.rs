use clap::{Args, Parser, Subcommand, ValueEnum};
use clinic::api::SearchField;
use clinic::model::{FieldGroup, Gender, PatientDraft, PatientUpdate};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clinic", bin_name = "clinic", version)]
#[command(about = "Patient records for a small clinic", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the roster and config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Use this roster file instead of the configured one
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all patients, sorted by last name
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show a patient's full record
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Patient id
        id: String,
    },

    /// Register a new patient (prompts for every field when none are given)
    #[command(alias = "n", display_order = 3)]
    Add {
        #[command(flatten)]
        fields: PatientFields,
    },

    /// Search patients
    #[command(display_order = 4)]
    Find {
        /// What to match the term against
        #[arg(value_enum)]
        by: SearchBy,

        /// Search term (case-insensitive substring; exact for ids)
        term: String,
    },

    /// Edit a patient (prompts for a field group when no fields are given)
    #[command(alias = "e", display_order = 5)]
    Edit {
        /// Patient id
        id: String,

        /// Fields to prompt for when editing interactively
        #[arg(long, value_enum, default_value = "all")]
        group: GroupArg,

        #[command(flatten)]
        fields: PatientFields,
    },

    /// Delete a patient
    #[command(alias = "rm", display_order = 6)]
    Delete {
        /// Patient id
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show roster statistics
    #[command(display_order = 7)]
    Stats,

    /// Run the interactive menu (default)
    #[command(display_order = 8)]
    Menu,

    /// Get or set configuration
    #[command(display_order = 9)]
    Config {
        /// Configuration key (data-file, timestamp-format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SearchBy {
    LastName,
    Id,
    Insurance,
    Phone,
}

impl From<SearchBy> for SearchField {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::LastName => SearchField::LastName,
            SearchBy::Id => SearchField::Id,
            SearchBy::Insurance => SearchField::InsuranceNumber,
            SearchBy::Phone => SearchField::Phone,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum GroupArg {
    Personal,
    Contacts,
    Medical,
    All,
}

impl From<GroupArg> for FieldGroup {
    fn from(group: GroupArg) -> Self {
        match group {
            GroupArg::Personal => FieldGroup::Personal,
            GroupArg::Contacts => FieldGroup::Contacts,
            GroupArg::Medical => FieldGroup::Medical,
            GroupArg::All => FieldGroup::All,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(gender: GenderArg) -> Self {
        match gender {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

/// Patient fields given on the command line.
#[derive(Args, Debug, Default)]
pub struct PatientFields {
    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub middle_name: Option<String>,

    /// DD.MM.YYYY
    #[arg(long)]
    pub birth_date: Option<String>,

    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long = "insurance")]
    pub insurance_number: Option<String>,

    #[arg(long = "history")]
    pub medical_history: Option<String>,

    #[arg(long)]
    pub diagnosis: Option<String>,

    #[arg(long = "doctor")]
    pub attending_doctor: Option<String>,
}

impl PatientFields {
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
            .all(|v| v.is_none())
    }

    pub fn into_draft(self) -> PatientDraft {
        PatientDraft {
            last_name: self.last_name.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            middle_name: self.middle_name,
            birth_date: self.birth_date.unwrap_or_default(),
            gender: self.gender.map(Gender::from),
            address: self.address.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            email: self.email,
            insurance_number: self.insurance_number.unwrap_or_default(),
            medical_history: self.medical_history.unwrap_or_default(),
            diagnosis: self.diagnosis.unwrap_or_default(),
            attending_doctor: self.attending_doctor.unwrap_or_default(),
        }
    }

    pub fn into_update(self) -> PatientUpdate {
        PatientUpdate {
            last_name: self.last_name,
            first_name: self.first_name,
            middle_name: self.middle_name,
            birth_date: self.birth_date,
            gender: self.gender.map(Gender::from),
            address: self.address,
            phone: self.phone,
            email: self.email,
            insurance_number: self.insurance_number,
            medical_history: self.medical_history,
            diagnosis: self.diagnosis,
            attending_doctor: self.attending_doctor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_flags_into_draft() {
        let cli = Cli::try_parse_from([
            "clinic",
            "add",
            "--last-name",
            "Smith",
            "--first-name",
            "Anna",
            "--gender",
            "female",
            "--doctor",
            "Dr. Grey",
        ])
        .unwrap();

        let Some(Commands::Add { fields }) = cli.command else {
            panic!("expected add");
        };
        assert!(!fields.is_empty());
        let draft = fields.into_draft();
        assert_eq!(draft.last_name, "Smith");
        assert_eq!(draft.gender, Some(Gender::Female));
        assert_eq!(draft.attending_doctor, "Dr. Grey");
        assert_eq!(draft.email, None);
    }

    #[test]
    fn parses_find_criteria() {
        let cli = Cli::try_parse_from(["clinic", "find", "last-name", "sm"]).unwrap();
        let Some(Commands::Find { by, term }) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(SearchField::from(by), SearchField::LastName);
        assert_eq!(term, "sm");
    }

    #[test]
    fn edit_without_flags_is_interactive() {
        let cli = Cli::try_parse_from(["clinic", "edit", "3", "--group", "medical"]).unwrap();
        let Some(Commands::Edit { id, group, fields }) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "3");
        assert_eq!(FieldGroup::from(group), FieldGroup::Medical);
        assert!(fields.is_empty());
    }

    #[test]
    fn rejects_unknown_gender() {
        let parsed = Cli::try_parse_from(["clinic", "add", "--gender", "other"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn no_command_means_menu() {
        let cli = Cli::try_parse_from(["clinic", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
