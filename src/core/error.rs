//! Error handling for depfund.
//!
//! This module provides the error types and user-friendly error reporting
//! used across the crate:
//! - [`DepfundError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Common standard library and ecosystem errors are automatically converted:
//! - [`std::io::Error`] → [`DepfundError::IoError`]
//! - [`serde_json::Error`] → [`DepfundError::JsonError`]
//! - [`toml::de::Error`] → [`DepfundError::TomlError`]
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly
//! format with contextual suggestions before displaying it in the CLI.
//!
//! # Examples
//!
//! ```rust,no_run
//! use depfund_cli::core::{DepfundError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(DepfundError::SnapshotNotFound { path: "catalog.json".to_string() }.into())
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(e);
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depfund operations.
///
/// Each variant represents a specific failure mode with enough context to
/// produce an actionable message. Pipeline-internal conditions (unmatched
/// dependencies, absent goals, ambiguous aliases) are deliberately *not*
/// errors; see the `engine` module.
#[derive(Error, Debug)]
pub enum DepfundError {
    /// Catalog snapshot file does not exist
    #[error("Catalog snapshot not found: {path}")]
    SnapshotNotFound {
        /// Path that was searched
        path: String,
    },

    /// Catalog snapshot file exists but could not be parsed
    #[error("Failed to parse catalog snapshot {path}: {reason}")]
    SnapshotParseError {
        /// Path of the snapshot file
        path: String,
        /// Parse failure description
        reason: String,
    },

    /// Catalog snapshot was written by a newer format version
    #[error("Unsupported catalog snapshot version {found} (supported: {supported})")]
    SnapshotVersionUnsupported {
        /// Version found in the file
        found: u32,
        /// Highest version this binary can read
        supported: u32,
    },

    /// Source-projects input file does not exist
    #[error("Source projects file not found: {path}")]
    ProjectInputNotFound {
        /// Path that was searched
        path: String,
    },

    /// Source-projects input file exists but could not be parsed
    #[error("Failed to parse source projects file {path}: {reason}")]
    ProjectInputParseError {
        /// Path of the input file
        path: String,
        /// Parse failure description
        reason: String,
    },

    /// Funding-platform request failed after retries
    #[error("Funding platform request failed for '{slug}': {reason}")]
    PlatformRequestFailed {
        /// Canonical slug of the project being fetched
        slug: String,
        /// Underlying failure description
        reason: String,
    },

    /// Global configuration problem
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the problem
        reason: String,
    },

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User-friendly error wrapper with optional suggestion and details.
///
/// Displayed to stderr with color coding: the error message in red and bold,
/// details in yellow, the suggestion in green.
pub struct ErrorContext {
    /// The underlying error
    pub error: DepfundError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`DepfundError`]
    #[must_use]
    pub const fn new(error: DepfundError) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error.to_string().red());

        if let Some(details) = &self.details {
            eprintln!("\n{} {}", "Details:".yellow().bold(), details.yellow());
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "Suggestion:".green().bold(), suggestion.green());
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("error", &self.error)
            .field("suggestion", &self.suggestion)
            .field("details", &self.details)
            .finish()
    }
}

/// Convert any error into a user-friendly [`ErrorContext`] with suggestions.
///
/// Downcasts to known error types and attaches contextual suggestions for
/// CLI display. Unknown errors pass through with their message intact.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<DepfundError>() {
        Ok(depfund_error) => create_error_context(depfund_error),
        Err(error) => {
            if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
                if io_error.kind() == std::io::ErrorKind::PermissionDenied {
                    return ErrorContext::new(DepfundError::Other(error)).with_suggestion(
                        "Check file ownership or run with appropriate permissions",
                    );
                }
            }
            ErrorContext::new(DepfundError::Other(error))
        }
    }
}

fn create_error_context(error: DepfundError) -> ErrorContext {
    match &error {
        DepfundError::SnapshotNotFound { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Pass the snapshot path with --snapshot, or run 'depfund refresh' to build one",
            )
            .with_details(
                "The catalog snapshot maps project names to funding-platform data and is \
                 produced by the refresh process",
            ),
        DepfundError::SnapshotParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Re-run 'depfund refresh' to regenerate the snapshot")
            .with_details(
                "Individual malformed entries are skipped automatically; this error means \
                 the file as a whole is not valid JSON",
            ),
        DepfundError::SnapshotVersionUnsupported { .. } => ErrorContext::new(error)
            .with_suggestion("Upgrade depfund to a release that understands this snapshot format"),
        DepfundError::ProjectInputNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the path passed with --input")
            .with_details(
                "The input file lists source projects and their already-extracted \
                 dependency declarations as JSON",
            ),
        DepfundError::ProjectInputParseError { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Expected JSON of the form [{\"id\": \"org/repo\", \"dependencies\": \
                 [{\"name\": \"react\", \"ecosystem\": \"npm\"}]}]",
            ),
        DepfundError::PlatformRequestFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check network connectivity and the configured API URL")
            .with_details(
                "Refresh keeps the previous catalog data for projects whose fetch fails",
            ),
        DepfundError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check ~/.depfund/config.toml for syntax errors"),
        DepfundError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax: quotes, brackets, and key names"),
        _ => ErrorContext::new(error),
    }
}
