//! Global configuration management.
//!
//! The global config lives at `~/.depfund/config.toml` and carries the
//! defaults a user wants across invocations: the funding-platform API URL,
//! refresh concurrency, and the sponsor cap. Command-line flags override
//! config values, which override built-in defaults.
//!
//! ```toml
//! api-url = "https://api.funding.example.com/v1/collectives"
//! concurrency = 10
//! sponsor-cap = 10
//! ```

use crate::constants::{DEFAULT_API_URL, DEFAULT_REFRESH_CONCURRENCY, DEFAULT_SPONSOR_CAP};
use crate::core::DepfundError;
use crate::utils::fs::safe_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Global configuration, merged under CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GlobalConfig {
    /// Funding-platform API base URL
    pub api_url: String,

    /// Concurrent platform fetches during refresh
    pub concurrency: usize,

    /// Maximum sponsors per catalog entry / recommendation
    pub sponsor_cap: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: DEFAULT_REFRESH_CONCURRENCY,
            sponsor_cap: DEFAULT_SPONSOR_CAP,
        }
    }
}

impl GlobalConfig {
    /// Load from the default path, falling back to defaults when the file
    /// does not exist.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() { Self::load_from(&path).await } else { Ok(Self::default()) }
    }

    /// Load from an explicit path when given, otherwise the default path.
    ///
    /// An explicit path must exist; the default path may be absent.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load from a specific path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content).map_err(|err| {
            DepfundError::ConfigError {
                reason: format!("{}: {err}", path.display()),
            }
            .into()
        })
    }

    /// Save to the default path atomically.
    pub async fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?).await
    }

    /// Save to a specific path atomically.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        safe_write(path, &content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// The default config location: `~/.depfund/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".depfund").join("config.toml"))
            .ok_or_else(|| {
                DepfundError::ConfigError { reason: "cannot determine home directory".to_string() }
                    .into()
            })
    }
}
