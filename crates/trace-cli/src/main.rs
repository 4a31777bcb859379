//! # trace CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing; batch state lives in a
//! local JSON state file selected with `--store`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trace_cli::ops::{
    run_advance, run_create, run_history, run_leaderboard, run_list, run_status, AdvanceArgs,
    BatchRefArgs, CreateArgs,
};

/// TraceLane CLI
///
/// Tracks product batches through the fixed custody chain
/// (producer, collector, customs, retailer) with an append-only
/// transition history and a completion-time leaderboard.
#[derive(Parser, Debug)]
#[command(name = "trace", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the batch state file.
    #[arg(long, global = true, default_value = "batches.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new batch at the start of the custody chain.
    Create(CreateArgs),

    /// Advance a batch one step along the custody chain.
    Advance(AdvanceArgs),

    /// Show a batch's state, progress, and next allowed action.
    Status(BatchRefArgs),

    /// Print a batch's transition history.
    History {
        #[command(flatten)]
        batch: BatchRefArgs,
        /// Emit the history as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List all registered batches.
    List,

    /// Show the completion-time leaderboard (top 10, fastest first).
    Leaderboard {
        /// Emit the leaderboard as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(store = %cli.store.display(), "trace CLI starting");

    let result = match cli.command {
        Commands::Create(args) => run_create(&args, &cli.store),
        Commands::Advance(args) => run_advance(&args, &cli.store),
        Commands::Status(args) => run_status(&args, &cli.store),
        Commands::History { batch, json } => run_history(&batch, json, &cli.store),
        Commands::List => run_list(&cli.store),
        Commands::Leaderboard { json } => run_leaderboard(json, &cli.store),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
