//! Dependency aggregation across source projects.
//!
//! Folds the dependency declarations of many source projects into one
//! deduplicated mapping keyed by [`DependencyKey`]. Merge order does not
//! affect the mapping content (the upsert is commutative and associative)
//! and the `BTreeMap`'s `(ecosystem, name)` key order gives the
//! deterministic presentation ordering.

use crate::models::{AggregatedDependency, DependencyKey, SourceProject};
use std::collections::BTreeMap;

/// Aggregate declared dependencies across source projects.
///
/// A project declaring the same dependency twice contributes once to
/// `using_projects` but increments `count` per declaration. Empty
/// dependency lists are valid and contribute nothing.
#[must_use]
pub fn aggregate(projects: &[SourceProject]) -> BTreeMap<DependencyKey, AggregatedDependency> {
    let mut aggregated = BTreeMap::new();

    for project in projects {
        for declared in &project.dependencies {
            let key = DependencyKey::new(&declared.ecosystem, &declared.name);
            let entry = aggregated.entry(key.clone()).or_insert_with(|| AggregatedDependency {
                name: key.name,
                ecosystem: key.ecosystem,
                using_projects: Default::default(),
                count: 0,
            });
            entry.using_projects.insert(project.id.clone());
            entry.count += 1;
        }
    }

    aggregated
}
