//! HTTP implementation of [`ProjectFetcher`] backed by `reqwest`.
//!
//! Fetches `{base_url}/{slug}.json` with a request timeout and bounded
//! exponential-backoff retries. A 404 means the platform does not know the
//! slug and maps to `Ok(None)`.

use super::{CollectiveData, ProjectFetcher};
use crate::constants::{
    HTTP_REQUEST_TIMEOUT, RETRY_ATTEMPTS, RETRY_BASE_DELAY_MS, RETRY_MAX_DELAY,
};
use crate::core::DepfundError;
use anyhow::Result;
use reqwest::StatusCode;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

/// `reqwest`-backed fetcher for the funding-platform JSON API.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher against the given API base URL.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_REQUEST_TIMEOUT)
            .user_agent(concat!("depfund/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url: base_url.into() })
    }

    fn project_url(&self, slug: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), slug)
    }

    async fn fetch_once(&self, url: &str) -> Result<Option<CollectiveData>, reqwest::Error> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response.error_for_status()?;
        Ok(Some(response.json().await?))
    }
}

impl ProjectFetcher for HttpFetcher {
    async fn fetch_project(&self, slug: &str) -> Result<Option<CollectiveData>> {
        let url = self.project_url(slug);
        debug!(slug, url = %url, "fetching project data");

        let strategy = ExponentialBackoff::from_millis(RETRY_BASE_DELAY_MS)
            .max_delay(RETRY_MAX_DELAY)
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        Retry::spawn(strategy, || self.fetch_once(&url)).await.map_err(|err| {
            DepfundError::PlatformRequestFailed { slug: slug.to_string(), reason: err.to_string() }
                .into()
        })
    }
}
