//! Shared data models for dependency aggregation.
//!
//! These are the already-structured records handed to the engine by the
//! surrounding layers: manifest-format parsing happens upstream and is out
//! of scope here. A [`SourceProject`] carries the dependency declarations of
//! one project; the aggregator folds many of them into
//! [`AggregatedDependency`] values keyed by [`DependencyKey`].

use crate::core::DepfundError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A third-party package declared by a source project.
///
/// Identity is `(ecosystem, normalized name)`; see [`DependencyKey`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredDependency {
    /// Package name as declared (normalization happens at aggregation)
    pub name: String,

    /// Package ecosystem tag, e.g. "npm", "cargo", "composer"
    pub ecosystem: String,
}

/// One source project and its declared dependencies.
///
/// An empty dependency list is valid and contributes nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProject {
    /// Stable identifier of the project, e.g. "acme/storefront"
    pub id: String,

    /// Dependency declarations extracted from the project's manifests
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
}

/// Identity key of a dependency: normalized `(ecosystem, name)`.
///
/// The derived `Ord` (ecosystem first, then name) is the documented sort key
/// for aggregated output, so iterating a `BTreeMap<DependencyKey, _>` yields
/// a deterministic presentation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyKey {
    /// Normalized ecosystem tag
    pub ecosystem: String,

    /// Normalized package name
    pub name: String,
}

impl DependencyKey {
    /// Build a key from raw declaration fields, applying normalization once.
    #[must_use]
    pub fn new(ecosystem: &str, name: &str) -> Self {
        Self { ecosystem: normalize(ecosystem), name: normalize(name) }
    }
}

impl std::fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ecosystem, self.name)
    }
}

/// Case-fold and trim a name or ecosystem tag.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A dependency merged across all source projects.
///
/// `count` tracks declarations (a project declaring the same dependency
/// twice counts twice); `using_projects` stays deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedDependency {
    /// Normalized package name
    pub name: String,

    /// Normalized ecosystem tag
    pub ecosystem: String,

    /// Distinct source projects declaring this dependency
    pub using_projects: BTreeSet<String>,

    /// Total number of declarations across all projects
    pub count: u32,
}

impl AggregatedDependency {
    /// Identity key of this aggregated dependency.
    #[must_use]
    pub fn key(&self) -> DependencyKey {
        DependencyKey { ecosystem: self.ecosystem.clone(), name: self.name.clone() }
    }
}

/// Load source projects from a JSON file.
///
/// The file is a JSON array of [`SourceProject`] records. This is input
/// glue, not manifest parsing: dependency extraction from raw manifest
/// formats happens in upstream tooling.
pub fn load_source_projects(path: &Path) -> Result<Vec<SourceProject>> {
    if !path.exists() {
        return Err(
            DepfundError::ProjectInputNotFound { path: path.display().to_string() }.into()
        );
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|err| {
        DepfundError::ProjectInputParseError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}
