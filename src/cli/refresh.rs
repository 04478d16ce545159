//! The `refresh` command: rebuild the catalog snapshot from the platform.
//!
//! Fetches fresh funding data for every catalog entry with bounded
//! concurrency, keeps stale data for entries whose fetch fails, and writes
//! the new snapshot atomically so concurrent readers never observe a
//! partially updated catalog.

use crate::catalog::{RefreshOptions, load_snapshot, refresh_snapshot, save_snapshot};
use crate::config::GlobalConfig;
use crate::platform::HttpFetcher;
use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

/// Refresh every catalog entry from the funding platform.
#[derive(Debug, Args)]
#[command(about = "Refresh the catalog snapshot from the funding platform")]
pub struct RefreshCommand {
    /// Catalog snapshot file to refresh
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Maximum concurrent platform fetches
    #[arg(long, value_name = "NUMBER")]
    pub concurrency: Option<usize>,

    /// Funding-platform API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write the refreshed snapshot here instead of replacing the input
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Don't show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl RefreshCommand {
    /// Execute the refresh command.
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let old = load_snapshot(&self.snapshot)?;

        let api_url = self.api_url.as_deref().unwrap_or(&config.api_url);
        let fetcher = HttpFetcher::new(api_url)?;

        let options = RefreshOptions {
            concurrency: self.concurrency.unwrap_or(config.concurrency),
            sponsor_cap: config.sponsor_cap,
        };

        let progress = if self.no_progress {
            None
        } else {
            let pb = ProgressBar::new(old.entries.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap()
                    .progress_chars("━╸━"),
            );
            pb.set_message("Refreshing catalog");
            Some(pb)
        };

        let new = refresh_snapshot(&old, &fetcher, &options, progress.as_ref()).await;

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        let target = self.output.as_ref().unwrap_or(&self.snapshot);
        save_snapshot(&new, target)?;

        info!(
            entries = new.entries.len(),
            path = %target.display(),
            "catalog snapshot refreshed"
        );
        println!("Refreshed {} catalog entries -> {}", new.entries.len(), target.display());

        Ok(())
    }
}
