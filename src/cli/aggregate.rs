//! The `aggregate` command: merge dependency declarations across projects.

use crate::config::GlobalConfig;
use crate::engine::aggregate;
use crate::models::{AggregatedDependency, load_source_projects};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Merge the dependency declarations of every source project in the input
/// file into one deduplicated table with usage counts.
#[derive(Debug, Args)]
#[command(about = "Merge dependency declarations across source projects")]
pub struct AggregateCommand {
    /// Source projects file (JSON array of {id, dependencies})
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

impl AggregateCommand {
    /// Execute the aggregate command.
    pub async fn execute(self, _config: &GlobalConfig) -> Result<()> {
        let projects = load_source_projects(&self.input)?;
        let aggregated = aggregate(&projects);
        let rows: Vec<&AggregatedDependency> = aggregated.values().collect();

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_table(&rows);
        }

        Ok(())
    }
}

fn print_table(rows: &[&AggregatedDependency]) {
    if rows.is_empty() {
        println!("No dependencies found");
        return;
    }

    let name_width =
        rows.iter().map(|d| d.name.len()).chain(std::iter::once("Dependency".len())).max().unwrap_or(0);
    let eco_width =
        rows.iter().map(|d| d.ecosystem.len()).chain(std::iter::once("Ecosystem".len())).max().unwrap_or(0);

    println!(
        "{:<name_width$}  {:<eco_width$}  {:>8}  {:>12}",
        "Dependency", "Ecosystem", "Projects", "Declarations"
    );
    for dependency in rows {
        println!(
            "{:<name_width$}  {:<eco_width$}  {:>8}  {:>12}",
            dependency.name,
            dependency.ecosystem,
            dependency.using_projects.len(),
            dependency.count
        );
    }
}
