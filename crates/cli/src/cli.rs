//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// bankmatch - propose matches between bank statement lines and ledger records
#[derive(Parser)]
#[command(name = "bankmatch")]
#[command(about = "Bank reconciliation auto-matcher", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Matching config (TOML). Unset keys fall back to defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct Inputs {
    /// JSON array of bank statement transactions
    #[arg(short, long)]
    pub bank: PathBuf,

    /// JSON array of accounting transactions
    #[arg(short, long)]
    pub ledger: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Auto-match every unreconciled bank transaction
    Match {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Show ranked suggestions for a single bank transaction
    Suggest {
        #[command(flatten)]
        inputs: Inputs,

        /// Bank transaction id
        #[arg(long)]
        id: String,
    },

    /// Summarise how much of the statement would auto-match
    Stats {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Find likely duplicate lines within a bank statement
    Duplicates {
        /// JSON array of bank statement transactions
        #[arg(short, long)]
        bank: PathBuf,

        /// Minimum description similarity (0.0-1.0)
        #[arg(short, long, default_value_t = 0.9)]
        threshold: f64,
    },

    /// Print the effective matching config as TOML
    Config,
}
