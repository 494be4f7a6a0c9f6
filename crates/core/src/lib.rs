//! diffmerge core library.
//!
//! This crate provides a line-based diff engine (LCS alignment, hunk
//! grouping, unified-diff formatting) and a merge engine (two-way and
//! three-way conflict detection, conflict markers, resolution). Every
//! operation is a pure function over in-memory strings.

pub mod config;
pub mod diff;
pub mod errors;
pub mod merge;

// Re-exports for convenience.
pub use config::EngineConfig;
pub use diff::{
    calculate_diff, format_diff, format_hunk, format_hunk_header, DiffEngine, DiffHunk, DiffLine,
    DiffResult,
};
pub use errors::CoreError;
pub use merge::{
    count_conflicts, detect_conflicts, has_conflict_markers, parse_conflicts,
    resolve_all_conflicts, resolve_conflict, resolve_conflicts_with, ConflictBlock,
    ConflictResult, MergeEngine, Resolution,
};
