//! bankmatch CLI
//!
//! Usage:
//!   bankmatch match --bank stmt.json --ledger ledger.json
//!   bankmatch suggest --bank stmt.json --ledger ledger.json --id TXN-1
//!   bankmatch stats --bank stmt.json --ledger ledger.json
//!   bankmatch duplicates --bank stmt.json
//!   bankmatch config --config matching.toml

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Match { inputs } => {
            commands::cmd_match(&config, &inputs.bank, &inputs.ledger, cli.json)
        }
        Commands::Suggest { inputs, id } => {
            commands::cmd_suggest(&config, &inputs.bank, &inputs.ledger, &id, cli.json)
        }
        Commands::Stats { inputs } => {
            commands::cmd_stats(&config, &inputs.bank, &inputs.ledger, cli.json)
        }
        Commands::Duplicates { bank, threshold } => {
            commands::cmd_duplicates(&config, &bank, threshold, cli.json)
        }
        Commands::Config => commands::cmd_config(&config),
    }
}
