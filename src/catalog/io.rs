//! Catalog snapshot persistence.
//!
//! Loading is tolerant at entry granularity: a malformed entry (for example
//! one missing its `balance`) is logged and skipped, so it behaves as
//! unmatched for every dependency while the rest of the snapshot still
//! loads. Saving is atomic via temp-and-rename, so a concurrent reader
//! never observes a partially written catalog.

use super::{CatalogEntry, PledgeCandidate, Snapshot};
use crate::constants::SNAPSHOT_FORMAT_VERSION;
use crate::core::DepfundError;
use crate::utils::fs::atomic_write;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default = "default_version")]
    version: u32,
    generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    entries: Vec<serde_json::Value>,
    #[serde(default)]
    pledge_candidates: Vec<PledgeCandidate>,
}

const fn default_version() -> u32 {
    SNAPSHOT_FORMAT_VERSION
}

/// Load a catalog snapshot from a JSON file.
///
/// # Errors
///
/// Fails when the file is missing, is not valid JSON, or was written by a
/// newer format version. Individual malformed entries are not errors.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Err(DepfundError::SnapshotNotFound { path: path.display().to_string() }.into());
    }

    let content = std::fs::read_to_string(path)?;
    let raw: RawSnapshot = serde_json::from_str(&content).map_err(|err| {
        DepfundError::SnapshotParseError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    })?;

    if raw.version > SNAPSHOT_FORMAT_VERSION {
        return Err(DepfundError::SnapshotVersionUnsupported {
            found: raw.version,
            supported: SNAPSHOT_FORMAT_VERSION,
        }
        .into());
    }

    let mut entries = Vec::with_capacity(raw.entries.len());
    for value in raw.entries {
        let slug = value.get("canonicalSlug").and_then(|v| v.as_str()).unwrap_or("<unknown>").to_string();
        match serde_json::from_value::<CatalogEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!(slug = %slug, error = %err, "skipping malformed catalog entry");
            }
        }
    }

    Ok(Snapshot {
        version: raw.version,
        generated_at: raw.generated_at.unwrap_or_else(Utc::now),
        entries,
        pledge_candidates: raw.pledge_candidates,
    })
}

/// Save a catalog snapshot to a JSON file atomically.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let mut content = serde_json::to_string_pretty(snapshot)?;
    content.push('\n');
    atomic_write(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let err = load_snapshot(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_skips_malformed_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        // Second entry is missing its balance and must be skipped.
        std::fs::write(
            &path,
            r#"{
                "version": 1,
                "generatedAt": "2026-08-01T00:00:00Z",
                "entries": [
                    {"id": "1", "canonicalSlug": "react", "name": "React", "balance": 5000},
                    {"id": "2", "canonicalSlug": "broken", "name": "Broken"}
                ]
            }"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();

        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries[0].canonical_slug, "react");
    }

    #[test]
    fn test_load_rejects_newer_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"version": 99, "entries": []}"#).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut snapshot = Snapshot::empty(Utc::now());
        snapshot.pledge_candidates.push(PledgeCandidate {
            name: "left-pad".to_string(),
            aliases: Default::default(),
            repo_handle: "left-pad/left-pad".to_string(),
        });
        save_snapshot(&snapshot, &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.version, snapshot.version);
        assert_eq!(loaded.pledge_candidates.len(), 1);
        assert_eq!(loaded.pledge_candidates[0].name, "left-pad");
    }
}
