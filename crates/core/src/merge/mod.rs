//! Conflict detection, marker serialization, and resolution.
//!
//! The merge subsystem is responsible for:
//! 1. **Detection** -- finding divergent regions between a local and a remote
//!    version, two-way or against a common base.
//! 2. **Markers** -- writing and recognising `<<<<<<<` / `=======` /
//!    `>>>>>>>` blocks in merged text.
//! 3. **Resolution** -- collapsing marker blocks back into plain text.

pub mod detector;
pub mod markers;
pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use detector::MergeEngine;
pub use markers::{count_conflicts, has_conflict_markers, parse_conflicts};
pub use resolver::{resolve_all_conflicts, resolve_conflict, resolve_conflicts_with};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One unresolved region of a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBlock {
    /// 0-based line offset of the opening marker in the merged output.
    pub start: usize,
    /// 0-based line offset of the closing marker in the merged output.
    pub end: usize,
    pub local: Vec<String>,
    pub remote: Vec<String>,
}

/// Result of conflict detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub has_conflicts: bool,
    /// Full merged text, with markers around each conflict.
    pub merged_content: String,
    /// One entry per marker block, in order.
    pub conflicts: Vec<ConflictBlock>,
}

impl ConflictResult {
    /// A conflict-free result carrying `content` unchanged.
    pub fn clean(content: &str) -> Self {
        Self {
            has_conflicts: false,
            merged_content: content.to_string(),
            conflicts: Vec::new(),
        }
    }
}

/// Which side a conflict block collapses to.
///
/// Parsing is lenient: anything other than `remote` or `both` means `local`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Resolution {
    #[default]
    Local,
    Remote,
    /// Local lines followed by remote lines.
    Both,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Both => "both",
        }
    }

    /// Parse a resolution name, falling back to [`Resolution::Local`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" => Self::Remote,
            "both" => Self::Both,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Resolution {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl From<String> for Resolution {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.as_str().to_string()
    }
}

/// Detect conflicts with default settings.
pub fn detect_conflicts(local: &str, remote: &str, base: Option<&str>) -> ConflictResult {
    MergeEngine::default().detect_conflicts(local, remote, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_parsing_falls_back_to_local() {
        assert_eq!(Resolution::from("remote"), Resolution::Remote);
        assert_eq!(Resolution::from(" Both "), Resolution::Both);
        assert_eq!(Resolution::from("local"), Resolution::Local);
        assert_eq!(Resolution::from("theirs"), Resolution::Local);
        assert_eq!(Resolution::from(""), Resolution::Local);
    }

    #[test]
    fn test_resolution_serde() {
        let json = serde_json::to_string(&Resolution::Both).unwrap();
        assert_eq!(json, "\"both\"");
        let parsed: Resolution = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(parsed, Resolution::Local);
    }

    #[test]
    fn test_conflict_result_serialized_shape() {
        let result = detect_conflicts("a", "b", None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hasConflicts"], true);
        assert_eq!(json["conflicts"][0]["local"][0], "a");
        assert_eq!(json["conflicts"][0]["end"], 4);
    }

    #[test]
    fn test_clean_result() {
        let result = ConflictResult::clean("text");
        assert!(!result.has_conflicts);
        assert_eq!(result.merged_content, "text");
    }
}
