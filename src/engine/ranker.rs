//! Recommendation assembly and ordering.
//!
//! Groups match outcomes into one recommendation per distinct catalog entry
//! (an entry may match several dependencies, e.g. multiple packages
//! published by the same funded project) and one per matched pledge
//! candidate, annotates goal progress and sponsors, and orders the result.
//!
//! Ordering is explicit so output is stable regardless of map iteration
//! order: descending count of distinct using projects (recommend what the
//! caller's projects depend on most broadly), then ascending canonical slug
//! (candidate name for pledge recommendations).

use super::goals::next_goal;
use super::matcher::{MatchOutcome, MatchResult};
use super::{PledgeState, Recommendation, RecommendOptions};
use crate::catalog::{CatalogEntry, PledgeCandidate};
use crate::models::DependencyKey;
use std::collections::{BTreeSet, HashMap};

struct Group<'a> {
    target: Target<'a>,
    matched: BTreeSet<DependencyKey>,
    using_projects: BTreeSet<String>,
}

enum Target<'a> {
    Entry(&'a CatalogEntry),
    Candidate(&'a PledgeCandidate),
}

/// Build the ordered recommendation list from match outcomes.
#[must_use]
pub fn rank(matches: &MatchResult<'_>, options: &RecommendOptions) -> Vec<Recommendation> {
    let mut groups: HashMap<String, Group<'_>> = HashMap::new();

    for (dependency, outcome) in &matches.outcomes {
        let (group_key, target) = match outcome {
            MatchOutcome::Entry(entry) => (format!("entry:{}", entry.id), Target::Entry(*entry)),
            MatchOutcome::Candidate(candidate) => {
                (format!("pledge:{}", candidate.name), Target::Candidate(*candidate))
            }
            MatchOutcome::Unmatched => continue,
        };

        let group = groups.entry(group_key).or_insert(Group {
            target,
            matched: BTreeSet::new(),
            using_projects: BTreeSet::new(),
        });
        group.matched.insert(dependency.key());
        group.using_projects.extend(dependency.using_projects.iter().cloned());
    }

    let mut recommendations: Vec<Recommendation> =
        groups.into_values().map(|group| build_recommendation(group, options)).collect();

    recommendations.sort_by(|a, b| {
        b.using_projects
            .len()
            .cmp(&a.using_projects.len())
            .then_with(|| sort_slug(a).cmp(&sort_slug(b)))
    });

    recommendations
}

fn sort_slug(recommendation: &Recommendation) -> &str {
    recommendation.canonical_slug.as_deref().unwrap_or(&recommendation.name)
}

fn build_recommendation(group: Group<'_>, options: &RecommendOptions) -> Recommendation {
    match group.target {
        Target::Entry(entry) => {
            let progress = next_goal(entry);
            let (goal, percent) =
                progress.map_or((None, None), |p| (Some(p.goal), Some(p.percent)));

            Recommendation {
                catalog_entry_id: Some(entry.id.clone()),
                name: entry.name.clone(),
                canonical_slug: Some(entry.canonical_slug.clone()),
                description: entry.description.clone(),
                matched_dependencies: group.matched,
                using_projects: group.using_projects,
                next_goal: goal,
                goal_percent: percent,
                yearly_budget: entry.yearly_budget,
                sponsors: entry.sponsors.iter().take(options.sponsor_cap).cloned().collect(),
                repo_handle: entry.linked_repo_handle.clone(),
                pledge_state: pledge_state(entry, options),
            }
        }
        Target::Candidate(candidate) => Recommendation {
            catalog_entry_id: None,
            name: candidate.name.clone(),
            canonical_slug: None,
            description: String::new(),
            matched_dependencies: group.matched,
            using_projects: group.using_projects,
            next_goal: None,
            goal_percent: None,
            yearly_budget: 0,
            sponsors: Vec::new(),
            repo_handle: Some(candidate.repo_handle.clone()),
            pledge_state: PledgeState::FirstPledge,
        },
    }
}

/// Pledge-state precedence for platform-backed entries: an existing pledge
/// on the platform outranks a caller-supplied backing record.
fn pledge_state(entry: &CatalogEntry, options: &RecommendOptions) -> PledgeState {
    if entry.is_pledged {
        PledgeState::ExistingPledge
    } else if options.backed.contains(&entry.canonical_slug) {
        PledgeState::Backed
    } else {
        PledgeState::None
    }
}
