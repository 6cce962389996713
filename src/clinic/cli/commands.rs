use super::menu;
use super::prompt::{prompt_draft, prompt_update, Prompter};
use super::render::{render_messages, render_patient_card, render_patient_table, render_stats};
use super::setup::{Cli, Commands, GroupArg, PatientFields, SearchBy};
use clap::Parser;
use clinic::api::{ClinicApi, CmdResult, ConfigAction};
use clinic::config::ClinicConfig;
use clinic::error::Result;
use clinic::init::{initialize, resolve_data_dir};
use clinic::store::fs::JsonFileStore;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ClinicApi<JsonFileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::Show { id }) => handle_show(&mut ctx, &id),
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::Find { by, term }) => handle_find(&mut ctx, by, &term),
        Some(Commands::Edit { id, group, fields }) => handle_edit(&mut ctx, &id, group, fields),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, &id, yes),
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Menu) | None => handle_menu(&mut ctx),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = initialize(&data_dir, cli.file.as_deref());

    if let Some(err) = &ctx.load_error {
        let backup = ctx.api.registry().store().backup_path();
        eprintln!(
            "{}",
            format!(
                "{}. Starting with an empty roster. The unreadable file is copied to {} before it is overwritten.",
                err,
                backup.display()
            )
            .yellow()
        );
    }

    Ok(AppContext { api: ctx.api })
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_patients()?;
    if !result.listed_patients.is_empty() {
        println!("{}", render_patient_table(&result.listed_patients));
    }
    print_messages(&result);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_patient(id)?;
    for patient in &result.listed_patients {
        println!("{}", render_patient_card(patient));
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: PatientFields) -> Result<()> {
    let draft = if fields.is_empty() {
        prompt_draft(&mut Prompter::stdio())?
    } else {
        fields.into_draft()
    };
    let result = ctx.api.add_patient(draft)?;
    print_messages(&result);
    Ok(())
}

fn handle_find(ctx: &mut AppContext, by: SearchBy, term: &str) -> Result<()> {
    let result = ctx.api.find_patients(by.into(), term)?;
    print_messages(&result);
    for patient in &result.listed_patients {
        println!("{}", render_patient_card(patient));
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    group: GroupArg,
    fields: PatientFields,
) -> Result<()> {
    let update = if fields.is_empty() {
        let current = ctx.api.view_patient(id)?;
        let mut prompter = Prompter::stdio();
        match current.listed_patients.first() {
            Some(patient) => {
                prompter.say(&render_patient_card(patient))?;
                prompt_update(&mut prompter, patient, group.into())?
            }
            None => return Ok(()),
        }
    } else {
        fields.into_update()
    };

    let result = ctx.api.update_patient(id, &update)?;
    print_messages(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let current = ctx.api.view_patient(id)?;
        let mut prompter = Prompter::stdio();
        for patient in &current.listed_patients {
            prompter.say(&render_patient_card(patient))?;
        }
        if !prompter.confirm("Delete this patient?")? {
            println!("{}", "Deletion cancelled.".dimmed());
            return Ok(());
        }
    }

    let result = ctx.api.delete_patient(id)?;
    print_messages(&result);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.statistics()?;
    if let Some(stats) = result.stats.as_ref().filter(|s| s.total > 0) {
        println!("{}", render_stats(stats));
    }
    print_messages(&result);
    Ok(())
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    menu::run(&mut ctx.api, &mut Prompter::stdio())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    print_messages(&result);

    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in ClinicConfig::keys() {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    Ok(())
}

fn print_messages(result: &CmdResult) {
    if !result.messages.is_empty() {
        println!("{}", render_messages(&result.messages));
    }
}
