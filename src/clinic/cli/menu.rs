//! The interactive numbered menu.
//!
//! Failures of a single action are printed and the loop carries on. Choosing
//! exit, or running out of input, saves the roster before leaving, unless
//! nothing changed since it was loaded.

use super::prompt::{is_end_of_input, prompt_draft, prompt_group, prompt_update, Prompter};
use super::render::{
    render_error, render_menu, render_messages, render_patient_card, render_patient_table,
    render_stats,
};
use clinic::api::{ClinicApi, CmdResult, SearchField};
use clinic::error::Result;
use clinic::store::PatientStore;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    List,
    Add,
    Find,
    Edit,
    Delete,
    Stats,
    Save,
    Reload,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::List),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::Find),
            "4" => Some(MenuChoice::Edit),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Stats),
            "7" => Some(MenuChoice::Save),
            "8" => Some(MenuChoice::Reload),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub fn run<S, R, W>(api: &mut ClinicApi<S>, prompter: &mut Prompter<R, W>) -> Result<()>
where
    S: PatientStore,
    R: BufRead,
    W: Write,
{
    prompter.say("Welcome to the clinic patient registry!")?;

    loop {
        prompter.say(&render_menu())?;
        let choice = match prompter.ask("Choose an action") {
            Ok(choice) => choice,
            Err(e) if is_end_of_input(&e) => break,
            Err(e) => return Err(e),
        };

        let Some(choice) = MenuChoice::parse(&choice) else {
            prompter.say("Invalid choice. Try again.")?;
            continue;
        };
        if choice == MenuChoice::Exit {
            break;
        }

        match perform(api, prompter, choice) {
            Ok(()) => {}
            Err(e) if is_end_of_input(&e) => break,
            Err(e) => prompter.say(&render_error(&e))?,
        }
    }

    if api.registry().is_modified() {
        prompter.say("Saving data...")?;
        match api.save() {
            Ok(result) => prompter.say(&render_messages(&result.messages))?,
            Err(e) => prompter.say(&render_error(&e))?,
        }
    } else {
        prompter.say("No changes to save.")?;
    }
    prompter.say("Goodbye!")
}

fn perform<S, R, W>(
    api: &mut ClinicApi<S>,
    prompter: &mut Prompter<R, W>,
    choice: MenuChoice,
) -> Result<()>
where
    S: PatientStore,
    R: BufRead,
    W: Write,
{
    match choice {
        MenuChoice::List => {
            let result = api.list_patients()?;
            if !result.listed_patients.is_empty() {
                prompter.say(&render_patient_table(&result.listed_patients))?;
            }
            report(prompter, &result)
        }
        MenuChoice::Add => {
            let draft = prompt_draft(prompter)?;
            let result = api.add_patient(draft)?;
            report(prompter, &result)
        }
        MenuChoice::Find => {
            prompter.say(
                "Search by:\n  1 - Last name\n  2 - ID\n  3 - Insurance number\n  4 - Phone",
            )?;
            let field: SearchField = prompter.ask("Your choice")?.parse()?;
            let term = prompter.ask("Search term")?;
            let result = api.find_patients(field, &term)?;
            report(prompter, &result)?;
            for patient in &result.listed_patients {
                prompter.say(&render_patient_card(patient))?;
            }
            Ok(())
        }
        MenuChoice::Edit => {
            let id = prompter.ask("Patient ID")?;
            let current = api.view_patient(&id)?;
            let Some(patient) = current.listed_patients.first() else {
                return Ok(());
            };
            prompter.say(&render_patient_card(patient))?;
            let group = prompt_group(prompter)?;
            let update = prompt_update(prompter, patient, group)?;
            let result = api.update_patient(&id, &update)?;
            report(prompter, &result)
        }
        MenuChoice::Delete => {
            let id = prompter.ask("Patient ID")?;
            let current = api.view_patient(&id)?;
            let Some(patient) = current.listed_patients.first() else {
                return Ok(());
            };
            prompter.say(&render_patient_card(patient))?;
            if prompter.confirm("Delete this patient?")? {
                let result = api.delete_patient(&id)?;
                report(prompter, &result)
            } else {
                prompter.say("Deletion cancelled.")
            }
        }
        MenuChoice::Stats => {
            let result = api.statistics()?;
            if let Some(stats) = result.stats.as_ref().filter(|s| s.total > 0) {
                prompter.say(&render_stats(stats))?;
            }
            report(prompter, &result)
        }
        MenuChoice::Save => {
            let result = api.save()?;
            report(prompter, &result)
        }
        MenuChoice::Reload => {
            let result = api.reload()?;
            report(prompter, &result)
        }
        MenuChoice::Exit => Ok(()),
    }
}

fn report<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, result: &CmdResult) -> Result<()> {
    if result.messages.is_empty() {
        return Ok(());
    }
    prompter.say(&render_messages(&result.messages))
}
