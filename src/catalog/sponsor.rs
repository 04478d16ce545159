//! Sponsor selection from raw funding-platform membership records.
//!
//! The selector runs during catalog refresh, never per recommendation run:
//! the engine consumes its output as part of each [`CatalogEntry`]'s
//! pre-computed sponsor list.
//!
//! Selection: keep organization backers, order by total donations
//! descending, collapse duplicate member ids to their highest-donation
//! record, truncate to the cap.
//!
//! [`CatalogEntry`]: super::CatalogEntry

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Membership role on the funding platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// A financial contributor; the only role that produces sponsors
    Backer,
    /// Project admin
    Admin,
    /// Fiscal host
    Host,
    /// Any other role the platform may report
    #[serde(other)]
    Other,
}

/// Kind of platform account behind a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberKind {
    /// An organization account
    Organization,
    /// An individual account
    Individual,
    /// Any other account kind
    #[serde(other)]
    Other,
}

/// Account details of a membership record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// Platform account id; sponsors are unique by this
    pub id: String,

    /// Account kind
    #[serde(rename = "type")]
    pub kind: MemberKind,

    /// Account slug
    pub slug: String,

    /// Display name
    pub name: String,
}

/// Donation statistics of a membership record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberStats {
    /// Lifetime donations in cents
    pub total_donations: i64,
}

/// One raw membership record as reported by the funding platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Membership role
    pub role: MemberRole,

    /// Account behind the membership
    pub member: MemberProfile,

    /// Donation statistics
    #[serde(default)]
    pub stats: MemberStats,
}

/// A selected sponsor: an organization ranked by total contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    /// Platform account id
    pub id: String,

    /// Account kind (always an organization today)
    #[serde(rename = "type")]
    pub kind: MemberKind,

    /// Account slug
    pub slug: String,

    /// Display name
    pub name: String,

    /// Lifetime donations in cents
    pub total_donations: i64,
}

/// Derive the bounded, deduplicated, ranked sponsor list for one project.
///
/// Filters to organization backers, sorts descending by donations (stable,
/// so platform order breaks ties), keeps the first occurrence of each member
/// id, and truncates to `cap`.
#[must_use]
pub fn select_sponsors(records: &[MemberRecord], cap: usize) -> Vec<Sponsor> {
    let mut backers: Vec<&MemberRecord> = records
        .iter()
        .filter(|r| r.role == MemberRole::Backer && r.member.kind == MemberKind::Organization)
        .collect();

    backers.sort_by(|a, b| b.stats.total_donations.cmp(&a.stats.total_donations));

    let mut seen = HashSet::new();
    backers
        .into_iter()
        .filter(|r| seen.insert(r.member.id.clone()))
        .take(cap)
        .map(|r| Sponsor {
            id: r.member.id.clone(),
            kind: r.member.kind,
            slug: r.member.slug.clone(),
            name: r.member.name.clone(),
            total_donations: r.stats.total_donations,
        })
        .collect()
}
