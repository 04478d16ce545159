//! Core types and error handling for depfund.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`DepfundError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! Failures inside the recommendation pipeline itself are local and
//! recoverable (unmatched dependencies are skipped, ambiguous aliases are
//! tie-broken with a diagnostic, absent goals are a valid state). The errors
//! defined here cover the surrounding concerns: missing or malformed input
//! files, unreadable snapshots, configuration problems, and funding-platform
//! request failures during catalog refresh.

pub mod error;

pub use error::{DepfundError, ErrorContext, user_friendly_error};
