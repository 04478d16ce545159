//! Command-line interface for depfund.
//!
//! Each command is implemented as a separate module with its own argument
//! struct and execution logic:
//!
//! - `aggregate` - Merge dependency declarations across source projects
//! - `recommend` - Produce the ranked funding recommendation list
//! - `refresh` - Refresh the catalog snapshot from the funding platform
//!
//! # Usage
//!
//! ```bash
//! # Merge dependencies across projects
//! depfund aggregate --input projects.json
//!
//! # Full pipeline: aggregate, match, annotate, rank
//! depfund recommend --input projects.json --snapshot catalog.json
//!
//! # Rebuild the catalog snapshot (bounded-concurrency platform fetches)
//! depfund refresh --snapshot catalog.json --concurrency 10
//! ```
//!
//! All commands support `--verbose` / `--quiet` and `--config` for a custom
//! global config file.

mod aggregate;
mod recommend;
mod refresh;

pub use aggregate::AggregateCommand;
pub use recommend::RecommendCommand;
pub use refresh::RefreshCommand;

use crate::config::GlobalConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Main CLI application structure for depfund.
#[derive(Parser)]
#[command(
    name = "depfund",
    about = "Discover which of your dependencies are fundable and get ranked funding recommendations",
    version,
    author,
    long_about = "depfund aggregates the dependencies of your source projects, matches them \
                  against a catalog of funding-platform-backed projects, and produces a ranked \
                  list of funding recommendations with live goal-progress indicators."
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to custom global configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Merge dependency declarations across source projects
    Aggregate(AggregateCommand),

    /// Produce the ranked funding recommendation list
    Recommend(RecommendCommand),

    /// Refresh the catalog snapshot from the funding platform
    Refresh(RefreshCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        init_tracing(self.verbose, self.quiet);

        let config = GlobalConfig::load_with_optional(self.config).await?;

        match self.command {
            Commands::Aggregate(cmd) => cmd.execute(&config).await,
            Commands::Recommend(cmd) => cmd.execute(&config).await,
            Commands::Refresh(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise verbosity flags choose the level.
/// Logs go to stderr so stdout stays clean for table/JSON output.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depfund_cli={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
