//! Common test utilities and fixtures for depfund integration tests.

// Allow dead code because these utilities are used across different test
// files and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temp directory for input files.
pub struct TestEnvironment {
    temp: TempDir,
}

impl TestEnvironment {
    /// Create a fresh environment.
    pub fn new() -> Result<Self> {
        Ok(Self { temp: TempDir::new()? })
    }

    /// Root path of the environment.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a file into the environment and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// A `depfund` command rooted in this environment.
    pub fn depfund_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("depfund").expect("depfund binary");
        cmd.current_dir(self.temp.path());
        cmd
    }
}

/// Source projects fixture: A uses {react, lodash}, B uses {react, babel}.
pub fn sample_projects() -> &'static str {
    r#"[
        {
            "id": "acme/project-a",
            "dependencies": [
                {"name": "react", "ecosystem": "npm"},
                {"name": "lodash", "ecosystem": "npm"}
            ]
        },
        {
            "id": "acme/project-b",
            "dependencies": [
                {"name": "react", "ecosystem": "npm"},
                {"name": "babel", "ecosystem": "npm"}
            ]
        }
    ]"#
}

/// Catalog fixture matching [`sample_projects`]: entries for react and
/// lodash, nothing for babel.
pub fn sample_catalog() -> &'static str {
    r#"{
        "version": 1,
        "generatedAt": "2026-08-01T00:00:00Z",
        "entries": [
            {
                "id": "1",
                "canonicalSlug": "react",
                "name": "React",
                "description": "UI library",
                "balance": 5000,
                "goals": [
                    {"type": "yearlyBudget", "amount": 10000, "title": "Sustainability"},
                    {"type": "yearlyBudget", "amount": 3000}
                ],
                "sponsors": [
                    {
                        "id": "s1",
                        "type": "ORGANIZATION",
                        "slug": "acme-corp",
                        "name": "Acme Corp",
                        "totalDonations": 120000
                    }
                ]
            },
            {
                "id": "2",
                "canonicalSlug": "lodash",
                "name": "Lodash",
                "description": "Utility belt",
                "balance": 0,
                "goals": []
            }
        ],
        "pledgeCandidates": []
    }"#
}
