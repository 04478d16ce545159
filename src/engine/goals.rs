//! Funding-goal progress: next unmet milestone and percent completion.

use crate::catalog::{CatalogEntry, Goal, GoalKind};
use serde::Serialize;

/// The next funding milestone to reach and how far along the balance is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Smallest yearly-budget goal the balance has not yet met
    pub goal: Goal,

    /// Percent completion, half-up rounded and clamped to 0–99
    pub percent: u8,
}

/// Select the next unmet yearly-budget goal for an entry.
///
/// Returns `None` when the entry has no goals or its balance already
/// exceeds every yearly-budget goal. That is a valid terminal state
/// ("no active goal"), distinct from a goal at 0%.
#[must_use]
pub fn next_goal(entry: &CatalogEntry) -> Option<GoalProgress> {
    let goal = entry
        .goals
        .iter()
        .filter(|g| g.kind == GoalKind::YearlyBudget && g.amount > 0 && g.amount > entry.balance)
        .min_by_key(|g| g.amount)?
        .clone();

    let percent = percent_towards(entry.balance, goal.amount);
    Some(GoalProgress { goal, percent })
}

/// Half-up rounded percent of `balance` towards `amount`, clamped to 0–99.
///
/// The clamp matters at both ends: a negative balance reads as 0%, and a
/// balance at 99.5%+ would otherwise round to 100 despite the goal being
/// unmet.
fn percent_towards(balance: i64, amount: i64) -> u8 {
    debug_assert!(amount > 0);
    let raw = (100.0 * balance as f64 / amount as f64).round() as i64;
    raw.clamp(0, 99) as u8
}
