//! Catalog of funding-platform projects available for matching.
//!
//! The catalog is an immutable [`Snapshot`] value: a sequence of
//! [`CatalogEntry`] records (funding-platform-backed projects) plus
//! [`PledgeCandidate`] records (projects known to be fundable but not yet on
//! the platform). The recommendation engine only ever reads a snapshot; the
//! refresh process ([`refresh`]) builds a brand-new snapshot and replaces
//! the old one wholesale, never by in-place field mutation while a run may be
//! reading it.
//!
//! [`CatalogStore`] implements the swap: it holds the current snapshot
//! behind an `Arc` and replaces the whole `Arc` on refresh, so a
//! recommendation run that cloned the `Arc` keeps a consistent view for its
//! entire duration.
//!
//! # Snapshot format
//!
//! Snapshots are JSON with camelCase field names, the contract shared with
//! the external sync collaborator:
//!
//! ```json
//! {
//!   "version": 1,
//!   "generatedAt": "2026-08-01T00:00:00Z",
//!   "entries": [
//!     {
//!       "id": "128",
//!       "canonicalSlug": "webpack",
//!       "aliases": ["webpack-cli", "webpack-dev-server"],
//!       "name": "webpack",
//!       "description": "Bundler",
//!       "balance": 1234500,
//!       "yearlyBudget": 8000000,
//!       "goals": [{"type": "yearlyBudget", "amount": 10000000, "title": "Sustainability"}],
//!       "isPledged": false,
//!       "linkedRepoHandle": "webpack",
//!       "sponsors": [...]
//!     }
//!   ],
//!   "pledgeCandidates": [
//!     {"name": "left-pad", "aliases": [], "repoHandle": "left-pad/left-pad"}
//!   ]
//! }
//! ```

pub mod io;
pub mod refresh;
pub mod sponsor;

pub use io::{load_snapshot, save_snapshot};
pub use refresh::{RefreshOptions, refresh_snapshot};
pub use sponsor::{MemberKind, MemberProfile, MemberRecord, MemberRole, MemberStats, Sponsor, select_sponsors};

use crate::constants::SNAPSHOT_FORMAT_VERSION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Kind of funding milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalKind {
    /// Annual budget target; the only kind that drives goal progress
    YearlyBudget,
    /// Anything else the platform may introduce
    #[default]
    #[serde(other)]
    Other,
}

/// A funding milestone a project aims to reach.
///
/// Platform data can carry goals with absent kind or amount. Default
/// substitution happens once, at decode (`Other`, 0); goal selection then
/// filters such goals out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Milestone kind
    #[serde(rename = "type", default)]
    pub kind: GoalKind,

    /// Target amount in cents
    #[serde(default)]
    pub amount: i64,

    /// Human-readable title shown with progress, when the platform has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A funding-platform-backed project available for matching.
///
/// Created and overwritten wholesale by the refresh process; read-only to
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Platform identifier; the lexicographically smallest id wins
    /// deterministically when two entries claim the same alias
    pub id: String,

    /// Canonical slug on the funding platform
    pub canonical_slug: String,

    /// Package names this project is known under, across ecosystems
    #[serde(default)]
    pub aliases: BTreeSet<String>,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Current balance in cents
    pub balance: i64,

    /// Yearly budget stat in cents (0 when the platform reports none)
    #[serde(default)]
    pub yearly_budget: i64,

    /// Funding milestones, in platform order
    #[serde(default)]
    pub goals: Vec<Goal>,

    /// Whether someone already pledged to this project on the platform
    #[serde(default)]
    pub is_pledged: bool,

    /// Code-hosting org or repo handle, when linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_repo_handle: Option<String>,

    /// Pre-computed sponsor list: deduplicated, descending by donations, capped
    #[serde(default)]
    pub sponsors: Vec<Sponsor>,
}

/// A project known to be fundable but not yet on the platform.
///
/// Matching one of these surfaces a first-pledge recommendation. The repo
/// handle is what makes the project pledgeable, so it is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeCandidate {
    /// Project name, matched like a canonical slug
    pub name: String,

    /// Additional package names to match
    #[serde(default)]
    pub aliases: BTreeSet<String>,

    /// Code-hosting org or repo handle used to create the pledge
    pub repo_handle: String,
}

/// An immutable catalog snapshot: everything one recommendation run reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// When the refresh process produced this snapshot
    pub generated_at: DateTime<Utc>,

    /// Funding-platform-backed projects, sorted by canonical slug
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,

    /// Known-fundable projects not yet on the platform
    #[serde(default)]
    pub pledge_candidates: Vec<PledgeCandidate>,
}

impl Snapshot {
    /// An empty snapshot at the current format version.
    #[must_use]
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_FORMAT_VERSION,
            generated_at,
            entries: Vec::new(),
            pledge_candidates: Vec::new(),
        }
    }
}

/// Holds the current catalog snapshot and swaps it atomically on refresh.
///
/// Readers clone the `Arc` once per recommendation run and keep a consistent
/// view for the run's whole duration, regardless of concurrent refreshes.
pub struct CatalogStore {
    current: RwLock<Arc<Snapshot>>,
}

impl CatalogStore {
    /// Create a store holding the given snapshot.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self { current: RwLock::new(Arc::new(snapshot)) }
    }

    /// The current snapshot. Cheap; clones only the `Arc`.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the current snapshot wholesale.
    ///
    /// Runs already holding the previous `Arc` keep reading the old
    /// snapshot; new runs see the new one.
    pub fn replace(&self, snapshot: Snapshot) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}
