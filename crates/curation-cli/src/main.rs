//! curate - command-line driver for import reconciliation
//!
//! Reads stubs and project columns as JSON, reports duplicates, and applies
//! reviewer decisions from a file.

mod commands;
mod decisions;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use curation_core::ReconcileConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "curate", version, about = "Detect and resolve duplicate study stubs")]
struct Cli {
    /// Reconciliation config (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the duplicate keys of each stub
    Keys {
        /// JSON array of stubs
        stubs: PathBuf,
    },
    /// List duplicate clusters inside an import batch
    Scan {
        /// JSON array of imported stubs
        batch: PathBuf,
    },
    /// Apply cluster decisions to an import batch and write the result
    Dedupe {
        batch: PathBuf,
        /// JSON array of {cluster, stub, resolution}
        #[arg(long)]
        decisions: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List duplicate cases between an import batch and project columns
    Match {
        batch: PathBuf,
        /// JSON array of columns
        columns: PathBuf,
    },
    /// Apply case decisions and write the merged import batch and columns
    Merge {
        batch: PathBuf,
        columns: PathBuf,
        /// JSON array of {case, project?, resolution}
        #[arg(long)]
        decisions: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ReconcileConfig::load(path)?,
        None => ReconcileConfig::default(),
    };

    match cli.command {
        Command::Keys { stubs } => commands::keys(&stubs),
        Command::Scan { batch } => commands::scan(&batch, &config),
        Command::Dedupe {
            batch,
            decisions,
            output,
        } => commands::dedupe(&batch, &decisions, output.as_deref(), &config),
        Command::Match { batch, columns } => commands::match_cases(&batch, &columns, &config),
        Command::Merge {
            batch,
            columns,
            decisions,
            output,
        } => commands::merge(&batch, &columns, &decisions, output.as_deref(), &config),
    }
}
