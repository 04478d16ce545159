//! Funding-platform client contract.
//!
//! The recommendation engine never talks to the network; the catalog
//! refresh process does, through the [`ProjectFetcher`] trait. A fetcher
//! returns the platform's current view of one project,
//! [`CollectiveData`], or `None` when the platform does not know the slug.
//!
//! Platform responses use default-valued nested fields liberally. All
//! default substitution happens here, at wire decode, via `Option` and
//! `#[serde(default)]`; downstream code only ever sees concrete values.

pub mod http;

pub use http::HttpFetcher;

use crate::catalog::{Goal, MemberRecord};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Funding statistics reported by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectiveStats {
    /// Current balance in cents
    pub balance: i64,

    /// Yearly budget in cents
    pub yearly_budget: i64,
}

/// Project settings carrying goals and code-host linkage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectiveSettings {
    /// Funding milestones
    pub goals: Vec<Goal>,

    /// Code-hosting organization handle, preferred over the repo handle
    pub github_org: Option<String>,

    /// Code-hosting repository handle
    pub github_repo: Option<String>,
}

/// The platform's current view of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectiveData {
    /// Canonical slug
    pub slug: String,

    /// Display name, when the platform has one
    #[serde(default)]
    pub name: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Funding statistics
    #[serde(default)]
    pub stats: CollectiveStats,

    /// Settings, including goals and code-host linkage
    #[serde(default)]
    pub settings: CollectiveSettings,

    /// Whether someone already pledged to this project
    #[serde(default)]
    pub is_pledged: bool,

    /// Raw membership records; fed to the sponsor selector during refresh
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

/// Fetches the current platform data for one project.
///
/// Implementations must treat "the platform does not know this slug" as
/// `Ok(None)`, not an error: refresh keeps the previous catalog data either
/// way, but an error is worth a louder log line.
pub trait ProjectFetcher {
    /// Fetch current data for `slug`.
    fn fetch_project(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<CollectiveData>>> + Send;
}
