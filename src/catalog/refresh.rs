//! Catalog refresh: rebuild every entry from fresh funding-platform data.
//!
//! One fetch per entry, fanned out with a bounded-concurrency stream so the
//! platform API is never overwhelmed. A single project's fetch failure is
//! logged and that entry's previous data is retained unchanged
//! (stale-but-present beats missing); the batch never aborts.
//!
//! The result is a brand-new [`Snapshot`]: callers persist it atomically
//! and/or swap it into a [`CatalogStore`](super::CatalogStore); existing
//! readers keep their consistent view of the old snapshot.

use super::{CatalogEntry, Snapshot, sponsor::select_sponsors};
use crate::constants::{DEFAULT_REFRESH_CONCURRENCY, DEFAULT_SPONSOR_CAP, SNAPSHOT_FORMAT_VERSION};
use crate::platform::{CollectiveData, ProjectFetcher};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tracing::{debug, warn};

/// Tuning knobs for a refresh run.
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    /// Maximum concurrent platform fetches
    pub concurrency: usize,

    /// Sponsor list cap applied by the sponsor selector
    pub sponsor_cap: usize,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self { concurrency: DEFAULT_REFRESH_CONCURRENCY, sponsor_cap: DEFAULT_SPONSOR_CAP }
    }
}

/// Refresh every catalog entry from the funding platform.
///
/// Entries whose fetch fails (or whose slug the platform no longer knows)
/// pass through unchanged. Pledge candidates are not refreshed; they carry
/// no platform data. Output entries are sorted by canonical slug so the
/// snapshot content is deterministic regardless of fetch completion order.
pub async fn refresh_snapshot<F>(
    old: &Snapshot,
    fetcher: &F,
    options: &RefreshOptions,
    progress: Option<&ProgressBar>,
) -> Snapshot
where
    F: ProjectFetcher + Sync,
{
    let concurrency = options.concurrency.max(1);

    let mut entries: Vec<CatalogEntry> = stream::iter(old.entries.iter())
        .map(|entry| async move {
            let refreshed = match fetcher.fetch_project(&entry.canonical_slug).await {
                Ok(Some(data)) => {
                    debug!(slug = %entry.canonical_slug, "refreshed entry");
                    rebuild_entry(entry, data, options.sponsor_cap)
                }
                Ok(None) => {
                    warn!(
                        slug = %entry.canonical_slug,
                        "project unknown to the funding platform; keeping previous data"
                    );
                    entry.clone()
                }
                Err(err) => {
                    warn!(
                        slug = %entry.canonical_slug,
                        error = %err,
                        "refresh fetch failed; keeping previous data"
                    );
                    entry.clone()
                }
            };
            if let Some(pb) = progress {
                pb.inc(1);
            }
            refreshed
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    entries.sort_by(|a, b| a.canonical_slug.cmp(&b.canonical_slug));

    Snapshot {
        version: SNAPSHOT_FORMAT_VERSION,
        generated_at: Utc::now(),
        entries,
        pledge_candidates: old.pledge_candidates.clone(),
    }
}

/// Rebuild one entry from fresh platform data.
///
/// Identity fields (id, canonical slug, aliases) pass through from the old
/// entry; funding data comes from the platform. The org handle is preferred
/// over the repo handle, and an entry keeps its previous handle when the
/// platform stops reporting one.
fn rebuild_entry(old: &CatalogEntry, data: CollectiveData, sponsor_cap: usize) -> CatalogEntry {
    CatalogEntry {
        id: old.id.clone(),
        canonical_slug: old.canonical_slug.clone(),
        aliases: old.aliases.clone(),
        name: data.name.unwrap_or_else(|| old.name.clone()),
        description: data.description.unwrap_or_else(|| old.description.clone()),
        balance: data.stats.balance,
        yearly_budget: data.stats.yearly_budget,
        goals: data.settings.goals,
        is_pledged: data.is_pledged,
        linked_repo_handle: data
            .settings
            .github_org
            .or(data.settings.github_repo)
            .or_else(|| old.linked_repo_handle.clone()),
        sponsors: select_sponsors(&data.members, sponsor_cap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemberKind, MemberProfile, MemberRecord, MemberRole, MemberStats};
    use crate::platform::{CollectiveSettings, CollectiveStats};
    use anyhow::{Result, anyhow};
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn entry(id: &str, slug: &str, balance: i64) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            canonical_slug: slug.to_string(),
            aliases: BTreeSet::new(),
            name: slug.to_string(),
            description: "old description".to_string(),
            balance,
            yearly_budget: 0,
            goals: Vec::new(),
            is_pledged: false,
            linked_repo_handle: None,
            sponsors: Vec::new(),
        }
    }

    fn snapshot(entries: Vec<CatalogEntry>) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            generated_at: Utc::now(),
            entries,
            pledge_candidates: Vec::new(),
        }
    }

    /// Succeeds for every slug except those listed as failing.
    struct StubFetcher {
        failing: Vec<String>,
        missing: Vec<String>,
    }

    impl ProjectFetcher for StubFetcher {
        async fn fetch_project(&self, slug: &str) -> Result<Option<CollectiveData>> {
            if self.failing.iter().any(|s| s == slug) {
                return Err(anyhow!("boom"));
            }
            if self.missing.iter().any(|s| s == slug) {
                return Ok(None);
            }
            Ok(Some(CollectiveData {
                slug: slug.to_string(),
                name: Some(format!("{slug} (fresh)")),
                description: None,
                stats: CollectiveStats { balance: 9999, yearly_budget: 50000 },
                settings: CollectiveSettings {
                    goals: Vec::new(),
                    github_org: Some("fresh-org".to_string()),
                    github_repo: None,
                },
                is_pledged: true,
                members: vec![MemberRecord {
                    role: MemberRole::Backer,
                    member: MemberProfile {
                        id: "m1".to_string(),
                        kind: MemberKind::Organization,
                        slug: "acme".to_string(),
                        name: "Acme".to_string(),
                    },
                    stats: MemberStats { total_donations: 500 },
                }],
            }))
        }
    }

    #[tokio::test]
    async fn test_refresh_rebuilds_entries() {
        let old = snapshot(vec![entry("1", "react", 5000)]);
        let fetcher = StubFetcher { failing: vec![], missing: vec![] };

        let new = refresh_snapshot(&old, &fetcher, &RefreshOptions::default(), None).await;

        assert_eq!(new.entries.len(), 1);
        let e = &new.entries[0];
        assert_eq!(e.balance, 9999);
        assert_eq!(e.name, "react (fresh)");
        // Platform omitted the description; the previous one is kept.
        assert_eq!(e.description, "old description");
        assert_eq!(e.linked_repo_handle.as_deref(), Some("fresh-org"));
        assert!(e.is_pledged);
        assert_eq!(e.sponsors.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_data() {
        let old = snapshot(vec![
            entry("1", "react", 5000),
            entry("2", "lodash", 777),
            entry("3", "babel", 42),
        ]);
        let fetcher =
            StubFetcher { failing: vec!["lodash".to_string()], missing: vec!["babel".to_string()] };

        let new = refresh_snapshot(&old, &fetcher, &RefreshOptions::default(), None).await;

        assert_eq!(new.entries.len(), 3);
        // Output is sorted by slug: babel, lodash, react.
        assert_eq!(new.entries[0].canonical_slug, "babel");
        assert_eq!(new.entries[0].balance, 42);
        assert_eq!(new.entries[1].canonical_slug, "lodash");
        assert_eq!(new.entries[1].balance, 777);
        assert_eq!(new.entries[2].canonical_slug, "react");
        assert_eq!(new.entries[2].balance, 9999);
    }

    /// Tracks the highest number of in-flight fetches ever observed.
    struct CountingFetcher {
        in_flight: AtomicUsize,
        max_seen: AtomicUsize,
    }

    impl ProjectFetcher for CountingFetcher {
        async fn fetch_project(&self, slug: &str) -> Result<Option<CollectiveData>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Some(CollectiveData {
                slug: slug.to_string(),
                name: None,
                description: None,
                stats: CollectiveStats::default(),
                settings: CollectiveSettings::default(),
                is_pledged: false,
                members: Vec::new(),
            }))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_refresh_bounds_concurrency() {
        let entries: Vec<CatalogEntry> =
            (0..12).map(|i| entry(&i.to_string(), &format!("project-{i}"), 0)).collect();
        let old = snapshot(entries);
        let fetcher =
            CountingFetcher { in_flight: AtomicUsize::new(0), max_seen: AtomicUsize::new(0) };
        let options = RefreshOptions { concurrency: 3, sponsor_cap: 10 };

        let new = refresh_snapshot(&old, &fetcher, &options, None).await;

        assert_eq!(new.entries.len(), 12);
        assert!(fetcher.max_seen.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_refresh_preserves_pledge_candidates() {
        let mut old = snapshot(vec![]);
        old.pledge_candidates.push(crate::catalog::PledgeCandidate {
            name: "left-pad".to_string(),
            aliases: BTreeSet::new(),
            repo_handle: "left-pad/left-pad".to_string(),
        });
        let fetcher = StubFetcher { failing: vec![], missing: vec![] };

        let new = refresh_snapshot(&old, &fetcher, &RefreshOptions::default(), None).await;

        assert_eq!(new.pledge_candidates.len(), 1);
    }
}
