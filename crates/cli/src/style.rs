//! Shared styling utilities for the CLI.

use console::Style;

use diffmerge_core::DiffLine;

/// Create a success-styled string (green with checkmark).
pub fn success(msg: &str) -> String {
    let style = Style::new().green();
    format!("{} {}", style.apply_to("✓"), msg)
}

/// Create a warning-styled string (yellow).
pub fn warn(msg: &str) -> String {
    let style = Style::new().yellow();
    format!("{} {}", style.apply_to("⚠"), msg)
}

/// Create a header-styled string (bold, white).
pub fn header(msg: &str) -> String {
    let style = Style::new().bold();
    style.apply_to(msg).to_string()
}

/// `---` / `+++` file header lines (bold).
pub fn file_header(line: &str) -> String {
    header(line)
}

/// `@@ ... @@` hunk header (cyan).
pub fn hunk_header(line: &str) -> String {
    let style = Style::new().cyan();
    style.apply_to(line).to_string()
}

/// One diff line: additions green, deletions red, context unstyled.
pub fn diff_line(line: &DiffLine) -> String {
    let text = line.to_string();
    match line {
        DiffLine::Add { .. } => Style::new().green().apply_to(text).to_string(),
        DiffLine::Delete { .. } => Style::new().red().apply_to(text).to_string(),
        DiffLine::Context { .. } => text,
    }
}
