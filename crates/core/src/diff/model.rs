//! Diff output types.
//!
//! Serialized field names are camelCase with a `type` tag on each line, the
//! shape the editor front-end reads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One line of comparison output.
///
/// Line numbers are 1-based. Each variant carries exactly the numbers that
/// exist for it: an added line has no old number, a deleted line no new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DiffLine {
    /// Present only in the new content.
    Add {
        content: String,
        new_line_number: usize,
    },
    /// Present only in the old content.
    Delete {
        content: String,
        old_line_number: usize,
    },
    /// Unchanged on both sides.
    Context {
        content: String,
        old_line_number: usize,
        new_line_number: usize,
    },
}

impl DiffLine {
    /// The line text, without its trailing newline.
    pub fn content(&self) -> &str {
        match self {
            Self::Add { content, .. }
            | Self::Delete { content, .. }
            | Self::Context { content, .. } => content,
        }
    }

    pub fn old_line_number(&self) -> Option<usize> {
        match self {
            Self::Delete {
                old_line_number, ..
            }
            | Self::Context {
                old_line_number, ..
            } => Some(*old_line_number),
            Self::Add { .. } => None,
        }
    }

    pub fn new_line_number(&self) -> Option<usize> {
        match self {
            Self::Add {
                new_line_number, ..
            }
            | Self::Context {
                new_line_number, ..
            } => Some(*new_line_number),
            Self::Delete { .. } => None,
        }
    }

    /// Whether this line is an addition or a deletion.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Context { .. })
    }

    /// Unified-diff prefix character.
    pub fn prefix(&self) -> char {
        match self {
            Self::Add { .. } => '+',
            Self::Delete { .. } => '-',
            Self::Context { .. } => ' ',
        }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.content())
    }
}

/// A contiguous region of changes plus surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    /// First old line covered (1-based; the preceding line when `old_lines` is 0).
    pub old_start: usize,
    /// Delete plus context lines in the hunk.
    pub old_lines: usize,
    /// First new line covered (1-based; the preceding line when `new_lines` is 0).
    pub new_start: usize,
    /// Add plus context lines in the hunk.
    pub new_lines: usize,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Add { .. }))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Delete { .. }))
            .count()
    }
}

/// Top-level output of a line diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Added lines across the whole comparison.
    pub additions: usize,
    /// Deleted lines across the whole comparison.
    pub deletions: usize,
    pub hunks: Vec<DiffHunk>,
}

impl DiffResult {
    /// True when the two inputs had no line-level differences.
    pub fn is_empty(&self) -> bool {
        self.additions == 0 && self.deletions == 0
    }

    /// Short `+A -D` change summary.
    pub fn summary(&self) -> String {
        format!("+{} -{}", self.additions, self.deletions)
    }
}
