mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    backup, completions, normalize, owners, phones, report, vaccinations, Context,
};
use crate::error::{exit_code_for, report_error};
use vetbase_config as config;
use vetbase_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "vetbase", version, about = "vetbase CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(name = "add-owner")]
    AddOwner(owners::AddOwnerArgs),
    #[command(name = "edit-owner")]
    EditOwner(owners::EditOwnerArgs),
    Show(owners::ShowArgs),
    List(owners::ListArgs),
    Delete(owners::DeleteArgs),
    #[command(name = "record-vaccination")]
    RecordVaccination(vaccinations::RecordVaccinationArgs),
    Vaccinations(vaccinations::ListVaccinationsArgs),
    /// Run one raw phone field through the normalization engine
    Normalize(normalize::NormalizeArgs),
    /// Canonicalize every owner's phone field in place
    #[command(name = "fix-phones")]
    FixPhones(phones::FixPhonesArgs),
    /// Export valid/invalid phone lists for owners vaccinated in a date range
    #[command(name = "phone-report")]
    PhoneReport(report::PhoneReportArgs),
    Backup(backup::BackupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            match command {
                // The engine is pure; a one-shot normalize never touches the
                // database.
                Command::Normalize(args) => normalize::run(&app_config, json, args),
                command => {
                    let db_path = paths::resolve_db_path(db_path)
                        .with_context(|| "resolve database path")?;
                    if verbose {
                        debug!(path = %db_path.display(), "database path resolved");
                    }

                    let store = Store::open(&db_path)
                        .with_context(|| format!("open database {}", db_path.display()))?;
                    store.migrate().with_context(|| "run migrations")?;

                    let ctx = Context {
                        store: &store,
                        json,
                        config: &app_config,
                    };

                    match command {
                        Command::AddOwner(args) => owners::add_owner(&ctx, args),
                        Command::EditOwner(args) => owners::edit_owner(&ctx, args),
                        Command::Show(args) => owners::show_owner(&ctx, args),
                        Command::List(args) => owners::list_owners(&ctx, args),
                        Command::Delete(args) => owners::delete_owner(&ctx, args),
                        Command::RecordVaccination(args) => {
                            vaccinations::record_vaccination(&ctx, args)
                        }
                        Command::Vaccinations(args) => vaccinations::list_vaccinations(&ctx, args),
                        Command::FixPhones(args) => phones::fix_phones(&ctx, args),
                        Command::PhoneReport(args) => report::phone_report(&ctx, args),
                        Command::Backup(args) => backup::backup(&ctx, args),
                        Command::Completions(_) | Command::Normalize(_) => {
                            unreachable!("handled before store initialization")
                        }
                    }
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
