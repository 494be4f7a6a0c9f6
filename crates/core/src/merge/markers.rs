//! Conflict-marker recognition and scanning.
//!
//! The scanner is deliberately forgiving: labels after `<<<<<<< ` and
//! `>>>>>>> ` are ignored, and an unterminated block runs to the end of the
//! input instead of failing.

use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::warn;

use super::ConflictBlock;

/// Opening marker prefix; a label follows the space.
pub const OPEN_MARKER: &str = "<<<<<<< ";
/// Separator between the local and remote sides.
pub const SEPARATOR: &str = "=======";
/// Closing marker prefix; a label follows the space.
pub const CLOSE_MARKER: &str = ">>>>>>> ";

fn any_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^(?:<{7} |={7}\r?$|>{7} )").expect("valid conflict marker pattern")
    })
}

fn open_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^<{7} ").expect("valid conflict marker pattern"))
}

/// True if any line of `content` is a conflict marker.
pub fn has_conflict_markers(content: &str) -> bool {
    any_marker_re().is_match(content)
}

/// Number of conflict blocks opened in `content`.
pub fn count_conflicts(content: &str) -> usize {
    open_marker_re().find_iter(content).count()
}

fn is_separator(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == SEPARATOR
}

/// One piece of scanned text: an ordinary line or a whole conflict block.
#[derive(Debug)]
pub(crate) enum Segment<'a> {
    Line(&'a str),
    Conflict(ConflictBlock),
}

enum ScanState {
    Outside,
    Local,
    Remote,
}

/// Split `content` into ordinary lines and conflict blocks.
///
/// Block offsets are 0-based line indices of the opening and closing marker.
/// An unterminated block ends at the last line: if the separator was never
/// seen every buffered line counts as local.
pub(crate) fn scan(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut state = ScanState::Outside;
    let mut start = 0usize;
    let mut last = 0usize;
    let mut local: Vec<String> = Vec::new();
    let mut remote: Vec<String> = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        last = idx;
        match state {
            ScanState::Outside => {
                if line.starts_with(OPEN_MARKER) {
                    state = ScanState::Local;
                    start = idx;
                } else {
                    segments.push(Segment::Line(line));
                }
            }
            ScanState::Local => {
                if is_separator(line) {
                    state = ScanState::Remote;
                } else {
                    local.push(line.to_string());
                }
            }
            ScanState::Remote => {
                if line.starts_with(CLOSE_MARKER) {
                    segments.push(Segment::Conflict(ConflictBlock {
                        start,
                        end: idx,
                        local: std::mem::take(&mut local),
                        remote: std::mem::take(&mut remote),
                    }));
                    state = ScanState::Outside;
                } else {
                    remote.push(line.to_string());
                }
            }
        }
    }

    if !matches!(state, ScanState::Outside) {
        warn!(start, "unterminated conflict block, treating remainder as part of it");
        segments.push(Segment::Conflict(ConflictBlock {
            start,
            end: last,
            local,
            remote,
        }));
    }

    segments
}

/// Recover the conflict blocks recorded in marker-laden text.
pub fn parse_conflicts(content: &str) -> Vec<ConflictBlock> {
    scan(content)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Conflict(block) => Some(block),
            Segment::Line(_) => None,
        })
        .collect()
}
