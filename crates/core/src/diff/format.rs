//! Unified-diff rendering.

use super::model::{DiffHunk, DiffResult};

/// The `@@ -a,b +c,d @@` header line of a hunk.
pub fn format_hunk_header(hunk: &DiffHunk) -> String {
    format!(
        "@@ -{},{} +{},{} @@",
        hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
    )
}

/// Render one hunk: its header followed by its prefixed lines.
pub fn format_hunk(hunk: &DiffHunk) -> String {
    let mut out = Vec::with_capacity(hunk.lines.len() + 1);
    out.push(format_hunk_header(hunk));
    out.extend(hunk.lines.iter().map(ToString::to_string));
    out.join("\n")
}

/// Render a whole diff with `---` / `+++` file headers.
pub fn format_diff(result: &DiffResult, old_path: &str, new_path: &str) -> String {
    let mut out = Vec::with_capacity(result.hunks.len() + 2);
    out.push(format!("--- {}", old_path));
    out.push(format!("+++ {}", new_path));
    out.extend(result.hunks.iter().map(format_hunk));
    out.join("\n")
}
