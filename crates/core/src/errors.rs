//! Error types for the diffmerge core library.
//!
//! The public diff and merge operations never fail; they degrade to a safe
//! result instead. The types here cover the seams that genuinely can fail
//! (configuration loading, bounded diffing, the internal detection path) and
//! a top-level [`CoreError`] unifies them for callers that want one type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Diff errors
// ---------------------------------------------------------------------------

/// Errors from the bounded diff entry point.
#[derive(Debug, Error)]
pub enum DiffError {
    /// The LCS table for the two inputs would exceed the configured bound.
    #[error("diff input too large: {old_lines}x{new_lines} lines exceeds {limit} LCS cells")]
    InputTooLarge {
        old_lines: usize,
        new_lines: usize,
        limit: u64,
    },
}

// ---------------------------------------------------------------------------
// Merge errors
// ---------------------------------------------------------------------------

/// Errors raised inside conflict detection.
///
/// These never reach callers of
/// [`MergeEngine::detect_conflicts`](crate::merge::MergeEngine::detect_conflicts);
/// they select the whole-file fallback instead.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Diffing one side against the base failed.
    #[error("diff against base failed ({side}): {source}")]
    BaseDiff {
        side: &'static str,
        #[source]
        source: DiffError,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// Rendering the config back to TOML failed.
    #[error("configuration serialize error: {0}")]
    SerializeError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
