//! The dependency-to-funding recommendation engine.
//!
//! A recommendation run is pure, synchronous, single-pass computation over
//! immutable inputs: the aggregated dependency set and one catalog
//! [`Snapshot`]. No locking, no I/O, no cancellation: it always completes,
//! and all failures inside it are local and recoverable.
//!
//! Pipeline: [`aggregate`] merges per-project dependency lists;
//! [`matcher`] resolves each aggregated dependency to at most one catalog
//! entry (or pledge candidate); [`goals`] and the pre-computed sponsor
//! lists annotate each match; [`ranker`] produces the final deterministic
//! ordering.
//!
//! # Examples
//!
//! ```rust
//! use depfund_cli::catalog::Snapshot;
//! use depfund_cli::engine::{RecommendOptions, aggregate, recommend};
//! use depfund_cli::models::SourceProject;
//! use chrono::Utc;
//!
//! let projects: Vec<SourceProject> = serde_json::from_str(
//!     r#"[{"id": "acme/web", "dependencies": [{"name": "react", "ecosystem": "npm"}]}]"#,
//! ).unwrap();
//!
//! let aggregated = aggregate(&projects);
//! let snapshot = Snapshot::empty(Utc::now());
//! let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());
//! assert!(recommendations.is_empty()); // empty catalog, nothing to recommend
//! ```

pub mod aggregator;
pub mod goals;
pub mod matcher;
pub mod ranker;

pub use aggregator::aggregate;
pub use goals::{GoalProgress, next_goal};
pub use matcher::{MatchDiagnostic, MatchOutcome, MatchResult, match_dependencies};

use crate::catalog::{Goal, Snapshot, Sponsor};
use crate::constants::DEFAULT_SPONSOR_CAP;
use crate::models::{AggregatedDependency, DependencyKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How the caller can fund a recommended project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PledgeState {
    /// Regular contribution target, no pledge involved
    None,
    /// Not on the platform yet; the caller would create the first pledge
    FirstPledge,
    /// Someone already pledged to this project on the platform
    ExistingPledge,
    /// The caller already has a funding relationship with this project
    Backed,
}

/// One ranked funding recommendation.
///
/// `catalog_entry_id` absent means "unmatched, fundable by pledge": the
/// recommendation came from a pledge candidate, carries no funding data,
/// and its `repo_handle` is what a pledge would be created against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Matched catalog entry id, absent for first-pledge recommendations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_entry_id: Option<String>,

    /// Display name
    pub name: String,

    /// Canonical slug on the funding platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_slug: Option<String>,

    /// Short description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Identity keys of the aggregated dependencies that matched
    pub matched_dependencies: BTreeSet<DependencyKey>,

    /// Union of using projects across all matched dependencies
    pub using_projects: BTreeSet<String>,

    /// Next unmet yearly-budget goal, absent when there is no active goal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_goal: Option<Goal>,

    /// Percent towards the next goal (0–99), absent with no active goal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_percent: Option<u8>,

    /// Yearly budget stat in cents
    pub yearly_budget: i64,

    /// Sponsor list, truncated to the configured cap
    pub sponsors: Vec<Sponsor>,

    /// Code-hosting handle, used to build pledge links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_handle: Option<String>,

    /// How the caller can fund this project
    pub pledge_state: PledgeState,
}

/// Options for one recommendation run.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Maximum sponsors carried per recommendation
    pub sponsor_cap: usize,

    /// Canonical slugs the caller already funds (existing funding
    /// relationships supplied by the caller)
    pub backed: BTreeSet<String>,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self { sponsor_cap: DEFAULT_SPONSOR_CAP, backed: BTreeSet::new() }
    }
}

/// Produce the ordered recommendation list for one aggregated dependency set.
///
/// Reads a consistent snapshot for the duration of the run; ambiguity
/// diagnostics are logged by the matcher. See [`ranker`] for the ordering
/// contract.
#[must_use]
pub fn recommend(
    aggregated: &BTreeMap<DependencyKey, AggregatedDependency>,
    snapshot: &Snapshot,
    options: &RecommendOptions,
) -> Vec<Recommendation> {
    let matches = match_dependencies(aggregated, snapshot);
    ranker::rank(&matches, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, GoalKind, MemberKind, PledgeCandidate};
    use crate::models::{DeclaredDependency, SourceProject};
    use chrono::Utc;

    fn project(id: &str, deps: &[&str]) -> SourceProject {
        SourceProject {
            id: id.to_string(),
            dependencies: deps
                .iter()
                .map(|name| DeclaredDependency {
                    name: (*name).to_string(),
                    ecosystem: "npm".to_string(),
                })
                .collect(),
        }
    }

    fn entry(id: &str, slug: &str, balance: i64, goals: Vec<Goal>) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            canonical_slug: slug.to_string(),
            aliases: BTreeSet::new(),
            name: slug.to_string(),
            description: format!("{slug} description"),
            balance,
            yearly_budget: 0,
            goals,
            is_pledged: false,
            linked_repo_handle: None,
            sponsors: Vec::new(),
        }
    }

    fn yearly(amount: i64) -> Goal {
        Goal { kind: GoalKind::YearlyBudget, amount, title: None }
    }

    fn sponsor(id: &str, donations: i64) -> Sponsor {
        Sponsor {
            id: id.to_string(),
            kind: MemberKind::Organization,
            slug: format!("org-{id}"),
            name: format!("Org {id}"),
            total_donations: donations,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Project A depends on {react, lodash}; project B on {react, babel}.
        // Catalog: react (balance 5000, goals 10000 and 3000), lodash
        // (balance 0, no goals); no entry for babel.
        let projects = vec![project("A", &["react", "lodash"]), project("B", &["react", "babel"])];
        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.entries = vec![
            entry("1", "react", 5000, vec![yearly(10000), yearly(3000)]),
            entry("2", "lodash", 0, vec![]),
        ];

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());

        assert_eq!(recommendations.len(), 2);

        let react = &recommendations[0];
        assert_eq!(react.canonical_slug.as_deref(), Some("react"));
        assert_eq!(
            react.using_projects.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(react.next_goal.as_ref().unwrap().amount, 10000);
        assert_eq!(react.goal_percent, Some(50));
        assert_eq!(react.pledge_state, PledgeState::None);

        let lodash = &recommendations[1];
        assert_eq!(lodash.canonical_slug.as_deref(), Some("lodash"));
        assert_eq!(lodash.using_projects.len(), 1);
        assert!(lodash.next_goal.is_none());
        assert!(lodash.goal_percent.is_none());
    }

    #[test]
    fn test_ranking_is_by_breadth_then_slug() {
        let projects = vec![
            project("A", &["zzz-broad", "aaa-broad", "narrow"]),
            project("B", &["zzz-broad", "aaa-broad"]),
        ];
        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.entries = vec![
            entry("1", "narrow", 0, vec![]),
            entry("2", "zzz-broad", 0, vec![]),
            entry("3", "aaa-broad", 0, vec![]),
        ];

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());

        let slugs: Vec<&str> =
            recommendations.iter().filter_map(|r| r.canonical_slug.as_deref()).collect();
        assert_eq!(slugs, vec!["aaa-broad", "zzz-broad", "narrow"]);
    }

    #[test]
    fn test_groups_multiple_packages_of_one_project() {
        let projects = vec![project("A", &["webpack"]), project("B", &["webpack-cli"])];
        let mut snapshot = Snapshot::empty(Utc::now());
        let mut webpack = entry("1", "webpack", 0, vec![]);
        webpack.aliases.insert("webpack-cli".to_string());
        snapshot.entries = vec![webpack];

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());

        assert_eq!(recommendations.len(), 1);
        let rec = &recommendations[0];
        assert_eq!(rec.matched_dependencies.len(), 2);
        assert_eq!(rec.using_projects.len(), 2);
    }

    #[test]
    fn test_pledge_states() {
        let projects = vec![project("A", &["pledged-proj", "backed-proj", "not-on-platform"])];
        let mut snapshot = Snapshot::empty(Utc::now());
        let mut pledged = entry("1", "pledged-proj", 0, vec![]);
        pledged.is_pledged = true;
        snapshot.entries = vec![pledged, entry("2", "backed-proj", 0, vec![])];
        snapshot.pledge_candidates = vec![PledgeCandidate {
            name: "not-on-platform".to_string(),
            aliases: BTreeSet::new(),
            repo_handle: "some/repo".to_string(),
        }];

        let aggregated = aggregate(&projects);
        let options = RecommendOptions {
            backed: std::iter::once("backed-proj".to_string()).collect(),
            ..Default::default()
        };
        let recommendations = recommend(&aggregated, &snapshot, &options);

        let state_of = |name: &str| {
            recommendations.iter().find(|r| r.name == name).map(|r| r.pledge_state).unwrap()
        };
        assert_eq!(state_of("pledged-proj"), PledgeState::ExistingPledge);
        assert_eq!(state_of("backed-proj"), PledgeState::Backed);
        assert_eq!(state_of("not-on-platform"), PledgeState::FirstPledge);

        let first_pledge =
            recommendations.iter().find(|r| r.name == "not-on-platform").unwrap();
        assert!(first_pledge.catalog_entry_id.is_none());
        assert_eq!(first_pledge.repo_handle.as_deref(), Some("some/repo"));
    }

    #[test]
    fn test_sponsor_cap_truncates_precomputed_list() {
        let projects = vec![project("A", &["popular"])];
        let mut snapshot = Snapshot::empty(Utc::now());
        let mut popular = entry("1", "popular", 0, vec![]);
        popular.sponsors = (0..10i64).map(|i| sponsor(&i.to_string(), 1000 - i)).collect();
        snapshot.entries = vec![popular];

        let aggregated = aggregate(&projects);
        let options = RecommendOptions { sponsor_cap: 3, ..Default::default() };
        let recommendations = recommend(&aggregated, &snapshot, &options);

        assert_eq!(recommendations[0].sponsors.len(), 3);
        assert_eq!(recommendations[0].sponsors[0].total_donations, 1000);
    }

    #[test]
    fn test_unmatched_without_candidate_is_excluded() {
        let projects = vec![project("A", &["totally-unknown"])];
        let snapshot = Snapshot::empty(Utc::now());

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());

        assert!(recommendations.is_empty());
    }

    #[test]
    fn test_recommendation_json_contract() {
        let projects = vec![project("A", &["react"])];
        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.entries = vec![entry("1", "react", 5000, vec![yearly(10000)])];

        let aggregated = aggregate(&projects);
        let recommendations = recommend(&aggregated, &snapshot, &RecommendOptions::default());
        let json = serde_json::to_value(&recommendations).unwrap();

        let rec = &json[0];
        assert_eq!(rec["catalogEntryId"], "1");
        assert_eq!(rec["goalPercent"], 50);
        assert_eq!(rec["pledgeState"], "none");
        assert_eq!(rec["nextGoal"]["amount"], 10000);
        assert_eq!(rec["usingProjects"][0], "A");
    }
}
