//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api::{self, CollectReport, RunOutcome};
use crate::domain::configuration::load_config;
use crate::domain::{AppError, PipelineConfig};

/// Exit code for a run whose model output was quarantined.
const EXIT_QUARANTINED: i32 = 2;

#[derive(Parser)]
#[command(name = "wxmood")]
#[command(version)]
#[command(
    about = "Collect weather snapshots and enrich them with validated mood summaries",
    long_about = None
)]
struct Cli {
    /// Path to the config file (default: ./wxmood.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch configured cities and store a raw snapshot
    #[clap(visible_alias = "c")]
    Collect,
    /// Enrich a stored raw snapshot
    #[clap(visible_alias = "p")]
    Process {
        /// Object name under the raw prefix (e.g. raw_weather_data/weather-....json)
        object: String,
    },
    /// Collect a snapshot, then enrich it
    Run,
    /// Print the latest processed artifact as JSON
    #[clap(visible_alias = "l")]
    Latest,
    /// Print the prompt for a local snapshot file without calling the model
    Prompt {
        /// Path to a raw snapshot JSON file
        file: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Collect => run_collect(&config).map(|()| 0),
        Commands::Process { object } => run_process(&config, &object),
        Commands::Run => run_all(&config),
        Commands::Latest => run_latest(&config).map(|_| 0),
        Commands::Prompt { file } => api::prompt(&config, &file).map(|prompt| {
            print!("{}", prompt);
            0
        }),
    });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_collect(config: &PipelineConfig) -> Result<(), AppError> {
    let report = api::collect(config)?;
    print_collect_report(&report);
    Ok(())
}

fn run_process(config: &PipelineConfig, object: &str) -> Result<i32, AppError> {
    let outcome = api::process(config, object)?;
    Ok(print_outcome(&outcome))
}

fn run_all(config: &PipelineConfig) -> Result<i32, AppError> {
    let (report, outcome) = api::run(config)?;
    print_collect_report(&report);
    Ok(print_outcome(&outcome))
}

fn run_latest(config: &PipelineConfig) -> Result<(), AppError> {
    let latest = api::latest(config)?;
    let rendered = serde_json::to_string_pretty(&latest)
        .map_err(|e| AppError::ParseError { what: latest.source.clone(), details: e.to_string() })?;
    println!("{}", rendered);
    Ok(())
}

fn print_collect_report(report: &CollectReport) {
    println!("✅ Uploaded {}", report.object);
    println!("   Cities fetched: {}", report.cities_fetched.join(", "));
    if !report.errors.is_empty() {
        println!("⚠️  Fetch errors:");
        for error in &report.errors {
            println!("   - {}", error);
        }
    }
}

fn print_outcome(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Persisted { artifact, diagnostic } => {
            println!("✅ Processed file saved to {}", artifact);
            if let Some(diagnostic) = diagnostic {
                println!("⚠️  Key set mismatch: {}", diagnostic);
            }
            0
        }
        RunOutcome::Quarantined { artifact, kind, detail } => {
            println!("⚠️  Model output was {} ({})", kind, detail);
            println!("⚠️  Saved invalid output to {}", artifact);
            EXIT_QUARANTINED
        }
        RunOutcome::Ignored { object } => {
            println!("Skipping unrelated object {}", object);
            0
        }
    }
}
