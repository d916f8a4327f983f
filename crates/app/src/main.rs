//! Timetable - school class hour generation and assignment
//!
//! Command line front end over the timetable engine and its SQLite database.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use timetable_core::{Database, EngineConfig, TimetableEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

mod commands;
mod error;
mod fixture;

use error::CliError;

#[derive(Parser)]
#[command(name = "timetable")]
#[command(version)]
#[command(about = "Generate school timetables and assign teachers and rooms to class hours", long_about = None)]
struct Cli {
    /// Configuration file (defaults to timetable.toml in the config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the configuration
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one six-day cycle of class hours for a program
    Generate {
        program_id: Uuid,

        /// First day of the cycle (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Assign teachers and rooms from a TOML file of [[request]] tables
    Assign { requests: PathBuf },
    /// Print the stored class hours of a program
    Show {
        program_id: Uuid,

        #[arg(long)]
        json: bool,
    },
    /// Load a school, its programs and users from a TOML fixture
    Seed { fixture: PathBuf },
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn open_engine(cli: &Cli, config: EngineConfig) -> Result<commands::Engine, CliError> {
    let db_path = match &cli.database {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(timetable_core::Error::from)?;
    }

    tracing::debug!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path)?;
    Ok(TimetableEngine::new(db, config))
}

fn run(cli: Cli, config: EngineConfig) -> Result<(), CliError> {
    let engine = open_engine(&cli, config)?;

    match cli.command {
        Commands::Generate { program_id, from } => commands::generate(&engine, program_id, from),
        Commands::Assign { requests } => commands::assign(&engine, &requests),
        Commands::Show { program_id, json } => commands::show(&engine, program_id, json),
        Commands::Seed { fixture } => commands::seed(&engine, &fixture),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match EngineConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_filter);

    tracing::info!(anchoring = ?config.window_anchoring, "Starting timetable");

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
