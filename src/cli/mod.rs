//! Command-line interface for bug-index
//!
//! Provides `update`, `lookup` and `completions` subcommands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::resolve_config;

mod completions;
mod lookup;
mod update;
mod utils;

/// Assign stable identifiers to JSONL bug records and look them up
#[derive(Parser)]
#[command(name = "bug-index")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to bug-index.toml/.yaml in the working directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add record and group identifiers to every line of a JSONL file
    Update(update::UpdateArgs),

    /// Look up records in an updated JSONL file by bug id or group id
    Lookup(lookup::LookupArgs),

    /// Print a shell completion script
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = resolve_config(&cwd, cli.config.as_deref())?;

    match cli.command {
        Commands::Update(args) => update::run(args, &config),
        Commands::Lookup(args) => lookup::run(args, &config),
        Commands::Completions(args) => completions::run(args),
    }
}
