//! Flowlens CLI
//!
//! Aggregates a workflow event log into per-step metrics, explains the
//! current bottleneck and flags steps whose simulated runs deviate from
//! the historical baseline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use flowlens::commands::{
    display_version, execute_add_event, execute_deviations, execute_events, execute_explain,
    execute_export_csv, execute_init, execute_metrics, execute_replay, execute_simulate,
    execute_watch, validate_documents, AddEventArgs, CommandContext,
};

/// Flowlens - process event-log analytics
#[derive(Parser, Debug)]
#[command(name = "flowlens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding workflow.json, eventlog.json and simulations.json
    #[arg(short, long, global = true, default_value = ".", env = "FLOWLENS_DIR")]
    dir: PathBuf,

    /// Engine configuration (TOML)
    #[arg(short, long, global = true, env = "FLOWLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed a demo workflow and event log
    Init,

    /// Per-step metrics, KPIs and period trend
    Metrics {
        /// Write the full analysis report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// One-line bottleneck explanation
    Explain,

    /// Compare the latest simulation batch against the event log
    Deviations {
        /// Write the deviation report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// List raw events, marking unusually long ones
    Events {
        /// Only show one case
        #[arg(long)]
        case: Option<String>,
    },

    /// Record a completed event
    AddEvent {
        /// Case id
        #[arg(long)]
        case: String,

        /// Activity (must match a step label to count)
        #[arg(short, long)]
        activity: String,

        /// Duration in seconds (defaults to 600)
        #[arg(long)]
        duration: Option<u64>,

        /// Who performed the step
        #[arg(long)]
        resource: Option<String>,
    },

    /// Export the event log as CSV
    ExportCsv {
        /// Output path
        #[arg(short, long, default_value = "eventlog.csv")]
        output: PathBuf,
    },

    /// Narrate one case's trace in order
    Replay {
        /// Case id (defaults to the most recent case)
        #[arg(long)]
        case: Option<String>,
    },

    /// Generate a simulated batch and store it
    Simulate {
        /// Number of cases to simulate
        #[arg(long, default_value = "5")]
        cases: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Recompute on every document change
    Watch {
        /// Polling interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Stop after this many snapshots
        #[arg(long)]
        max_updates: Option<usize>,
    },

    /// Validate the documents
    Validate,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let ctx = CommandContext::from_args(&cli.dir, cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Init => execute_init(&ctx)?,

        Commands::Metrics { json } => execute_metrics(&ctx, json)?,

        Commands::Explain => execute_explain(&ctx)?,

        Commands::Deviations { json } => execute_deviations(&ctx, json)?,

        Commands::Events { case } => execute_events(&ctx, case.as_deref())?,

        Commands::AddEvent {
            case,
            activity,
            duration,
            resource,
        } => {
            let args = AddEventArgs {
                case_id: case,
                activity,
                duration_secs: duration,
                resource,
            };
            execute_add_event(&ctx, args)?;
        }

        Commands::ExportCsv { output } => execute_export_csv(&ctx, &output)?,

        Commands::Replay { case } => execute_replay(&ctx, case)?,

        Commands::Simulate { cases, seed } => execute_simulate(&ctx, cases, seed)?,

        Commands::Watch {
            interval_ms,
            max_updates,
        } => execute_watch(&ctx, Duration::from_millis(interval_ms), max_updates)?,

        Commands::Validate => validate_documents(&ctx)?,

        Commands::Version => display_version(),
    }

    Ok(())
}
