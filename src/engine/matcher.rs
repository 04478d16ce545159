//! Resolution of aggregated dependencies against the catalog snapshot.
//!
//! A dependency matches a catalog entry when its normalized name equals the
//! entry's canonical slug or any alias, case-insensitively. Ecosystem is
//! deliberately not part of the match key: one funded project may publish
//! packages into several ecosystems under different names, all enumerated in
//! its alias set.
//!
//! When several entries claim the same alias (a catalog-authoring defect)
//! the entry with the lexicographically smallest id wins deterministically
//! and a [`MatchDiagnostic`] is recorded; funding data is never merged.
//! Dependencies with no entry fall through to the pledge candidates; those
//! matching neither produce nothing.

use crate::catalog::{CatalogEntry, PledgeCandidate, Snapshot};
use crate::models::{AggregatedDependency, DependencyKey, normalize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::warn;

/// Where one aggregated dependency resolved to.
#[derive(Debug)]
pub enum MatchOutcome<'a> {
    /// A funding-platform-backed catalog entry
    Entry(&'a CatalogEntry),
    /// A known-fundable project not yet on the platform
    Candidate(&'a PledgeCandidate),
    /// Nothing; the dependency is excluded from output
    Unmatched,
}

/// Ambiguous-alias diagnostic, recorded for operator visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDiagnostic {
    /// The alias claimed by more than one entry
    pub alias: String,
    /// Id of the entry that won the tie-break
    pub chosen_id: String,
    /// Ids of the losing contenders
    pub contenders: Vec<String>,
}

impl fmt::Display for MatchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alias '{}' claimed by entries [{}]; picked '{}'",
            self.alias,
            self.contenders.join(", "),
            self.chosen_id
        )
    }
}

/// Result of matching one aggregated dependency set against a snapshot.
#[derive(Debug)]
pub struct MatchResult<'a> {
    /// Per-dependency outcomes, in aggregation order
    pub outcomes: Vec<(&'a AggregatedDependency, MatchOutcome<'a>)>,
    /// Ambiguity diagnostics encountered while building the alias index
    pub diagnostics: Vec<MatchDiagnostic>,
}

/// Match every aggregated dependency against the catalog snapshot.
///
/// Diagnostics are both returned and logged, so library callers can surface
/// them and CLI runs still leave an operator trail.
#[must_use]
pub fn match_dependencies<'a>(
    aggregated: &'a BTreeMap<DependencyKey, AggregatedDependency>,
    snapshot: &'a Snapshot,
) -> MatchResult<'a> {
    let (entry_index, diagnostics) = build_entry_index(snapshot);
    let candidate_index = build_candidate_index(snapshot);

    for diagnostic in &diagnostics {
        warn!(alias = %diagnostic.alias, chosen = %diagnostic.chosen_id, "ambiguous catalog alias");
    }

    let outcomes = aggregated
        .values()
        .map(|dependency| {
            let outcome = if let Some(entry) = entry_index.get(dependency.name.as_str()) {
                MatchOutcome::Entry(*entry)
            } else if let Some(candidate) = candidate_index.get(dependency.name.as_str()) {
                MatchOutcome::Candidate(*candidate)
            } else {
                MatchOutcome::Unmatched
            };
            (dependency, outcome)
        })
        .collect();

    MatchResult { outcomes, diagnostics }
}

/// Build the alias → entry index, resolving ambiguous claims.
fn build_entry_index(
    snapshot: &Snapshot,
) -> (HashMap<String, &CatalogEntry>, Vec<MatchDiagnostic>) {
    let mut claims: HashMap<String, Vec<&CatalogEntry>> = HashMap::new();

    for entry in &snapshot.entries {
        claims.entry(normalize(&entry.canonical_slug)).or_default().push(entry);
        for alias in &entry.aliases {
            claims.entry(normalize(alias)).or_default().push(entry);
        }
    }

    let mut index = HashMap::with_capacity(claims.len());
    let mut diagnostics = Vec::new();

    for (alias, mut entries) in claims {
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries.dedup_by(|a, b| a.id == b.id);
        if entries.len() > 1 {
            diagnostics.push(MatchDiagnostic {
                alias: alias.clone(),
                chosen_id: entries[0].id.clone(),
                contenders: entries.iter().map(|e| e.id.clone()).collect(),
            });
        }
        index.insert(alias, entries[0]);
    }

    // HashMap iteration order must not leak into output.
    diagnostics.sort_by(|a, b| a.alias.cmp(&b.alias));

    (index, diagnostics)
}

fn build_candidate_index(snapshot: &Snapshot) -> HashMap<String, &PledgeCandidate> {
    let mut index: HashMap<String, &PledgeCandidate> = HashMap::new();

    for candidate in &snapshot.pledge_candidates {
        for name in std::iter::once(&candidate.name).chain(candidate.aliases.iter()) {
            // First candidate wins; candidate lists are small and curated.
            index.entry(normalize(name)).or_insert(candidate);
        }
    }

    index
}
