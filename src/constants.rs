//! Global constants used throughout the depfund codebase.
//!
//! This module contains default limits, timeouts, and retry parameters that
//! are used across multiple modules. Defining them centrally improves
//! maintainability and makes magic numbers more discoverable.

use std::time::Duration;

/// Current catalog snapshot format version.
///
/// Bumped whenever the on-disk snapshot schema changes in a way older
/// binaries cannot read. Loading a snapshot with a higher version fails
/// before the engine runs.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Maximum number of sponsors kept per catalog entry (default cap).
///
/// The sponsor selector truncates to this length during catalog refresh;
/// `recommend` may truncate further but never extends past it.
pub const DEFAULT_SPONSOR_CAP: usize = 10;

/// Default number of concurrent funding-platform fetches during refresh.
///
/// Bounded to avoid overwhelming the platform API. One project's fetch
/// failure never aborts the batch.
pub const DEFAULT_REFRESH_CONCURRENCY: usize = 10;

/// Default funding-platform API base URL.
///
/// Each catalog entry is refreshed from `{base}/{slug}.json`. Overridable
/// via the global config file or `--api-url`.
pub const DEFAULT_API_URL: &str = "https://api.funding.example.com/v1/collectives";

/// Timeout for a single funding-platform HTTP request (30 seconds).
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Starting delay for fetch retry backoff (50ms).
///
/// Doubles on each retry attempt, capped at [`RETRY_MAX_DELAY`].
pub const RETRY_BASE_DELAY_MS: u64 = 50;

/// Maximum delay between fetch retries (2 seconds).
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(2);

/// Number of retries after the initial fetch attempt.
pub const RETRY_ATTEMPTS: usize = 3;
