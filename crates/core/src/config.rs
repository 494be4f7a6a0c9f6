//! TOML-based configuration for the diff and merge engines.
//!
//! Every section and field is optional; a missing file section falls back to
//! the defaults the engines use when built with `Default`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;

/// Upper bound accepted for `diff.context_lines`.
const MAX_CONTEXT_LINES: usize = 100;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Diff engine settings.
    #[serde(default)]
    pub diff: DiffConfig,

    /// Merge engine settings.
    #[serde(default)]
    pub merge: MergeConfig,

    /// Log output settings for front-ends.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Diff engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffConfig {
    /// Context lines kept around each change block (default 3).
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Largest LCS table (old lines + 1) x (new lines + 1) the bounded diff
    /// will allocate.
    #[serde(default = "default_max_lcs_cells")]
    pub max_lcs_cells: u64,
}

fn default_context_lines() -> usize {
    3
}
fn default_max_lcs_cells() -> u64 {
    25_000_000
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            max_lcs_cells: default_max_lcs_cells(),
        }
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeConfig {
    /// Cap on lines buffered per side for one two-way conflict (default 50).
    #[serde(default = "default_max_conflict_lines")]
    pub max_conflict_lines: usize,

    /// Label written after the `<<<<<<<` marker.
    #[serde(default = "default_local_label")]
    pub local_label: String,

    /// Label written after the `>>>>>>>` marker.
    #[serde(default = "default_remote_label")]
    pub remote_label: String,
}

fn default_max_conflict_lines() -> usize {
    50
}
fn default_local_label() -> String {
    "LOCAL".into()
}
fn default_remote_label() -> String {
    "REMOTE".into()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_conflict_lines: default_max_conflict_lines(),
            local_label: default_local_label(),
            remote_label: default_remote_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl EngineConfig {
    /// Load an [`EngineConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate that all values are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.diff.context_lines > MAX_CONTEXT_LINES {
            return Err(ConfigError::InvalidValue {
                field: "diff.context_lines".into(),
                detail: format!("must be at most {}", MAX_CONTEXT_LINES),
            });
        }
        if self.diff.max_lcs_cells == 0 {
            return Err(ConfigError::InvalidValue {
                field: "diff.max_lcs_cells".into(),
                detail: "must be > 0".into(),
            });
        }
        if self.merge.max_conflict_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "merge.max_conflict_lines".into(),
                detail: "must be > 0".into(),
            });
        }
        validate_label(&self.merge.local_label, "merge.local_label")?;
        validate_label(&self.merge.remote_label, "merge.remote_label")?;

        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

fn validate_label(label: &str, field: &str) -> Result<(), ConfigError> {
    if label.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            detail: "marker label must not be empty".into(),
        });
    }
    if label.contains('\n') || label.contains('\r') {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            detail: "marker label must be a single line".into(),
        });
    }
    Ok(())
}
