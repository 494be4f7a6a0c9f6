//! Line-level diffing.
//!
//! The diff subsystem is responsible for:
//! 1. **Alignment** -- an LCS over the two line sequences.
//! 2. **Hunking** -- grouping changes with a bounded context window.
//! 3. **Formatting** -- rendering hunks as unified-diff text.
//!
//! Inputs are split on `\n` only. Text ending in a newline therefore has a
//! trailing empty line, and comparing it against text without one reports a
//! change on that last line.

mod format;
mod hunk;
mod lcs;
pub mod model;

use tracing::debug;

use crate::config::DiffConfig;
use crate::errors::DiffError;

pub use format::{format_diff, format_hunk, format_hunk_header};
pub use model::{DiffHunk, DiffLine, DiffResult};

/// Stateless line diff engine configured with a context window and an
/// optional size bound.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compute the line diff of `old` against `new`.
    ///
    /// Never fails. Time and memory are O(m·n) in the line counts; use
    /// [`try_calculate_diff`](Self::try_calculate_diff) to enforce the
    /// configured bound.
    pub fn calculate_diff(&self, old: &str, new: &str) -> DiffResult {
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();
        self.diff_lines(&old_lines, &new_lines)
    }

    /// Like [`calculate_diff`](Self::calculate_diff), but refuses inputs whose
    /// LCS table would exceed `max_lcs_cells`.
    pub fn try_calculate_diff(&self, old: &str, new: &str) -> Result<DiffResult, DiffError> {
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();

        let cells = lcs::table_cells(old_lines.len(), new_lines.len());
        if cells > self.config.max_lcs_cells {
            return Err(DiffError::InputTooLarge {
                old_lines: old_lines.len(),
                new_lines: new_lines.len(),
                limit: self.config.max_lcs_cells,
            });
        }

        Ok(self.diff_lines(&old_lines, &new_lines))
    }

    fn diff_lines(&self, old: &[&str], new: &[&str]) -> DiffResult {
        let lines = lcs::line_diff(old, new);

        let additions = lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Add { .. }))
            .count();
        let deletions = lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Delete { .. }))
            .count();

        let hunks = hunk::group_hunks(lines, self.config.context_lines);
        debug!(
            old_lines = old.len(),
            new_lines = new.len(),
            additions,
            deletions,
            hunks = hunks.len(),
            "diff computed"
        );

        DiffResult {
            additions,
            deletions,
            hunks,
        }
    }
}

/// Diff `old` against `new` with default settings.
pub fn calculate_diff(old: &str, new: &str) -> DiffResult {
    DiffEngine::default().calculate_diff(old, new)
}
