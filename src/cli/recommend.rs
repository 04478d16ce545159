//! The `recommend` command: the full recommendation pipeline.
//!
//! Loads the source-projects input and the catalog snapshot, runs
//! aggregate → match → annotate → rank, and prints the ordered
//! recommendation list as a table or JSON.

use crate::config::GlobalConfig;
use crate::engine::{PledgeState, Recommendation, RecommendOptions, aggregate, recommend};
use crate::models::load_source_projects;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Produce the ranked funding recommendation list for a set of source
/// projects.
#[derive(Debug, Args)]
#[command(about = "Produce the ranked funding recommendation list")]
pub struct RecommendCommand {
    /// Source projects file (JSON array of {id, dependencies})
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Catalog snapshot file
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Maximum sponsors listed per recommendation
    #[arg(long, value_name = "NUMBER")]
    pub sponsor_cap: Option<usize>,

    /// Canonical slug the caller already funds (repeatable)
    #[arg(long = "backed", value_name = "SLUG")]
    pub backed: Vec<String>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,
}

impl RecommendCommand {
    /// Execute the recommend command.
    pub async fn execute(self, config: &GlobalConfig) -> Result<()> {
        let projects = load_source_projects(&self.input)?;
        let snapshot = crate::catalog::load_snapshot(&self.snapshot)?;

        let options = RecommendOptions {
            sponsor_cap: self.sponsor_cap.unwrap_or(config.sponsor_cap),
            backed: self.backed.iter().cloned().collect(),
        };

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &options);

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        } else {
            print_table(&recommendations);
        }

        Ok(())
    }
}

fn print_table(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations: nothing in your dependencies matched the catalog");
        return;
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        println!("{}. {} {}", rank + 1, rec.name.bold(), state_label(rec.pledge_state));

        println!(
            "   used by {} project{} ({})",
            rec.using_projects.len(),
            if rec.using_projects.len() == 1 { "" } else { "s" },
            rec.using_projects.iter().cloned().collect::<Vec<_>>().join(", ")
        );

        if rec.yearly_budget > 0 {
            println!("   yearly budget {}", format_amount(rec.yearly_budget));
        }

        match (&rec.next_goal, rec.goal_percent) {
            (Some(goal), Some(percent)) => {
                let title = goal.title.as_deref().unwrap_or("next goal");
                println!("   {percent}% towards {title} ({}/yr)", format_amount(goal.amount));
            }
            _ => println!("   no active goal"),
        }

        if !rec.sponsors.is_empty() {
            let names: Vec<String> = rec
                .sponsors
                .iter()
                .take(3)
                .map(|s| format!("{} ({})", s.name, format_amount(s.total_donations)))
                .collect();
            let others = rec.sponsors.len().saturating_sub(3);
            if others > 0 {
                println!("   backers: {} and {others} others", names.join(", "));
            } else {
                println!("   backers: {}", names.join(", "));
            }
        }
    }
}

fn state_label(state: PledgeState) -> String {
    match state {
        PledgeState::None => String::new(),
        PledgeState::FirstPledge => "[pledge]".blue().to_string(),
        PledgeState::ExistingPledge => "[pledged]".blue().to_string(),
        PledgeState::Backed => "[backing]".green().to_string(),
    }
}

/// Format an amount of cents for display: "$950", "$12K".
fn format_amount(cents: i64) -> String {
    let dollars = cents / 100;
    if dollars.abs() >= 1000 {
        format!("${}K", (dollars as f64 / 1000.0).round() as i64)
    } else {
        format!("${dollars}")
    }
}
