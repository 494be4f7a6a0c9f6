//! Conflict resolution.
//!
//! Resolution rewrites marker-laden text into plain text. Each block is
//! either fully resolved or left alone; there is no partial state.

use std::collections::BTreeMap;

use tracing::debug;

use super::markers::{scan, Segment};
use super::{ConflictBlock, Resolution};

impl ConflictBlock {
    /// Lines kept when this block is resolved with `resolution`.
    pub fn resolved_lines(&self, resolution: Resolution) -> Vec<&str> {
        let local = self.local.iter().map(String::as_str);
        let remote = self.remote.iter().map(String::as_str);
        match resolution {
            Resolution::Local => local.collect(),
            Resolution::Remote => remote.collect(),
            Resolution::Both => local.chain(remote).collect(),
        }
    }
}

/// Resolve a single block to text.
///
/// `Both` keeps the local lines followed by the remote lines.
pub fn resolve_conflict(conflict: &ConflictBlock, resolution: Resolution) -> String {
    conflict.resolved_lines(resolution).join("\n")
}

/// Resolve every conflict block in `merged_content` the same way.
///
/// Lines outside marker blocks pass through unchanged.
pub fn resolve_all_conflicts(merged_content: &str, resolution: Resolution) -> String {
    resolve_conflicts_with(merged_content, &BTreeMap::new(), resolution)
}

/// Resolve conflict blocks individually.
///
/// `choices` is keyed by each block's `start` line offset, as reported in
/// [`ConflictBlock::start`]; blocks without an entry use `default`.
pub fn resolve_conflicts_with(
    merged_content: &str,
    choices: &BTreeMap<usize, Resolution>,
    default: Resolution,
) -> String {
    let segments = scan(merged_content);
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    let mut resolved = 0usize;

    for segment in &segments {
        match segment {
            Segment::Line(line) => out.push(*line),
            Segment::Conflict(block) => {
                let resolution = choices.get(&block.start).copied().unwrap_or(default);
                out.extend(block.resolved_lines(resolution));
                resolved += 1;
            }
        }
    }

    debug!(resolved, "conflict blocks resolved");
    out.join("\n")
}
