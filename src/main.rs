//! depfund CLI entry point.
//!
//! Handles command-line argument parsing, error display, and command
//! execution. See the `cli` module for the available commands.

use anyhow::Result;
use clap::Parser;
use depfund_cli::cli;
use depfund_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
