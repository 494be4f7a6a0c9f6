//! Grouping of a flat line diff into context-bounded hunks.

use super::model::{DiffHunk, DiffLine};

/// Lines collected for a hunk that is still open.
struct HunkBuilder {
    /// Old-side lines that precede the hunk.
    old_base: usize,
    /// New-side lines that precede the hunk.
    new_base: usize,
    lines: Vec<DiffLine>,
}

impl HunkBuilder {
    fn finish(self) -> DiffHunk {
        let old_lines = self
            .lines
            .iter()
            .filter(|l| !matches!(l, DiffLine::Add { .. }))
            .count();
        let new_lines = self
            .lines
            .iter()
            .filter(|l| !matches!(l, DiffLine::Delete { .. }))
            .count();

        DiffHunk {
            old_start: if old_lines == 0 { self.old_base } else { self.old_base + 1 },
            old_lines,
            new_start: if new_lines == 0 { self.new_base } else { self.new_base + 1 },
            new_lines,
            lines: self.lines,
        }
    }
}

/// Group `lines` into hunks carrying at most `context` lines of context on
/// each side of a change block.
///
/// Change blocks separated by more than `2 * context` unchanged lines land
/// in separate hunks; closer blocks share one. Input without any change
/// lines yields no hunks.
pub(crate) fn group_hunks(lines: Vec<DiffLine>, context: usize) -> Vec<DiffHunk> {
    let mut hunks = Vec::new();
    let mut current: Option<HunkBuilder> = None;
    // Context lines seen since the last change.
    let mut run: Vec<DiffLine> = Vec::new();
    let mut old_seen = 0usize;
    let mut new_seen = 0usize;

    for line in lines {
        let (old_step, new_step) = match line {
            DiffLine::Add { .. } => (0, 1),
            DiffLine::Delete { .. } => (1, 0),
            DiffLine::Context { .. } => (1, 1),
        };

        if !line.is_change() {
            run.push(line);
        } else {
            let mut hunk = match current.take() {
                Some(mut open) if run.len() <= 2 * context => {
                    open.lines.append(&mut run);
                    open
                }
                previous => {
                    if let Some(mut closed) = previous {
                        let tail = run.len().min(context);
                        closed.lines.extend(run.drain(..tail));
                        hunks.push(closed.finish());
                    }
                    let lead_from = run.len().saturating_sub(context);
                    let lead: Vec<DiffLine> = run.drain(lead_from..).collect();
                    run.clear();
                    HunkBuilder {
                        old_base: old_seen - lead.len(),
                        new_base: new_seen - lead.len(),
                        lines: lead,
                    }
                }
            };
            hunk.lines.push(line);
            current = Some(hunk);
        }

        old_seen += old_step;
        new_seen += new_step;
    }

    if let Some(mut open) = current {
        let tail = run.len().min(context);
        open.lines.extend(run.drain(..tail));
        hunks.push(open.finish());
    }

    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::lcs::line_diff;

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("l{}", i)).collect()
    }

    fn diff_lines(old: &[String], new: &[String]) -> Vec<DiffLine> {
        let old: Vec<&str> = old.iter().map(String::as_str).collect();
        let new: Vec<&str> = new.iter().map(String::as_str).collect();
        line_diff(&old, &new)
    }

    #[test]
    fn test_no_changes_no_hunks() {
        let old = numbered(10);
        let hunks = group_hunks(diff_lines(&old, &old), 3);
        assert!(hunks.is_empty());
    }

    #[test]
    fn test_distant_changes_split() {
        let old = numbered(20);
        let mut new = old.clone();
        new[1] = "L2".into();
        new[9] = "L10".into();

        let hunks = group_hunks(diff_lines(&old, &new), 3);
        assert_eq!(hunks.len(), 2);

        // Only one line of leading context exists before line 2.
        assert_eq!(
            (hunks[0].old_start, hunks[0].old_lines, hunks[0].new_start, hunks[0].new_lines),
            (1, 5, 1, 5)
        );
        assert_eq!(
            (hunks[1].old_start, hunks[1].old_lines, hunks[1].new_start, hunks[1].new_lines),
            (7, 7, 7, 7)
        );
        assert_eq!(hunks[1].lines.first().map(DiffLine::content), Some("l7"));
        assert_eq!(hunks[1].lines.last().map(DiffLine::content), Some("l13"));
    }

    #[test]
    fn test_close_changes_share_hunk() {
        let old = numbered(20);
        let mut new = old.clone();
        // Six unchanged lines (l4..=l9) separate the two edits.
        new[2] = "L3".into();
        new[9] = "L10".into();

        let hunks = group_hunks(diff_lines(&old, &new), 3);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.old_lines, 13);
        assert_eq!(hunk.additions(), 2);
        assert_eq!(hunk.deletions(), 2);
    }

    #[test]
    fn test_insertion_at_start() {
        let old = vec!["a".to_string()];
        let new = vec!["x".to_string(), "a".to_string()];
        let hunks = group_hunks(diff_lines(&old, &new), 3);
        assert_eq!(hunks.len(), 1);
        assert_eq!(
            (hunks[0].old_start, hunks[0].old_lines, hunks[0].new_start, hunks[0].new_lines),
            (1, 1, 1, 2)
        );
    }

    #[test]
    fn test_pure_deletion_of_tail() {
        let old = numbered(5);
        let new = numbered(3);
        let hunks = group_hunks(diff_lines(&old, &new), 3);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!((hunk.old_start, hunk.old_lines), (1, 5));
        assert_eq!((hunk.new_start, hunk.new_lines), (1, 3));
    }

    #[test]
    fn test_zero_context() {
        let old = numbered(5);
        let mut new = old.clone();
        new[2] = "L3".into();
        let hunks = group_hunks(diff_lines(&old, &new), 0);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].lines.len(), 2);
        assert_eq!((hunks[0].old_start, hunks[0].old_lines), (3, 1));
    }
}
