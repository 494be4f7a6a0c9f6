//! End-to-end tests for the diff → detect → resolve workflow.
//!
//! These exercise the public API the way the editor store does: diff two
//! versions, detect conflicts between local and remote edits, then collapse
//! the markers with a bulk or per-block strategy.

use std::collections::BTreeMap;
use std::io::Write;

use diffmerge_core::{
    calculate_diff, count_conflicts, detect_conflicts, format_diff, has_conflict_markers,
    parse_conflicts, resolve_all_conflicts, resolve_conflict, resolve_conflicts_with,
    ConflictBlock, DiffEngine, EngineConfig, MergeEngine, Resolution,
};

// ===========================================================================
// Helpers
// ===========================================================================

fn samples() -> Vec<&'static str> {
    vec![
        "",
        "\n",
        "single",
        "line1\nline2\nline3",
        "line1\nline2\nline3\n",
        "a\na\na\nb\na",
        "fn main() {\n    println!(\"hi\");\n}\n",
        "x\n\n\ny\n\n",
    ]
}

fn sample_pairs() -> Vec<(&'static str, &'static str)> {
    let all = samples();
    let mut pairs = Vec::new();
    for a in &all {
        for b in &all {
            pairs.push((*a, *b));
        }
    }
    pairs
}

// ===========================================================================
// Diff properties
// ===========================================================================

#[test]
fn no_op_diff_is_empty() {
    for text in samples() {
        let result = calculate_diff(text, text);
        assert_eq!(result.additions, 0, "{:?}", text);
        assert_eq!(result.deletions, 0, "{:?}", text);
        assert!(result.hunks.is_empty(), "{:?}", text);
    }
}

#[test]
fn hunk_counts_add_up() {
    for (old, new) in sample_pairs() {
        let result = calculate_diff(old, new);
        let adds: usize = result.hunks.iter().map(|h| h.additions()).sum();
        let dels: usize = result.hunks.iter().map(|h| h.deletions()).sum();
        assert_eq!(adds, result.additions, "{:?} -> {:?}", old, new);
        assert_eq!(dels, result.deletions, "{:?} -> {:?}", old, new);

        for hunk in &result.hunks {
            let old_side = hunk.lines.iter().filter(|l| l.old_line_number().is_some()).count();
            let new_side = hunk.lines.iter().filter(|l| l.new_line_number().is_some()).count();
            assert_eq!(hunk.old_lines, old_side);
            assert_eq!(hunk.new_lines, new_side);
        }
    }
}

#[test]
fn diff_reconstructs_both_sides() {
    // With a context window wide enough to cover every line, the single hunk
    // replays the full old and new content.
    let engine = DiffEngine::new(diffmerge_core::config::DiffConfig {
        context_lines: 100,
        ..Default::default()
    });
    for (old, new) in sample_pairs() {
        let result = engine.calculate_diff(old, new);
        if result.hunks.is_empty() {
            assert_eq!(old, new);
            continue;
        }
        assert_eq!(result.hunks.len(), 1);
        let lines = &result.hunks[0].lines;
        let rebuilt_old: Vec<&str> = lines
            .iter()
            .filter(|l| l.old_line_number().is_some())
            .map(|l| l.content())
            .collect();
        let rebuilt_new: Vec<&str> = lines
            .iter()
            .filter(|l| l.new_line_number().is_some())
            .map(|l| l.content())
            .collect();
        assert_eq!(rebuilt_old.join("\n"), old);
        assert_eq!(rebuilt_new.join("\n"), new);
    }
}

#[test]
fn single_line_change_scenario() {
    let result = calculate_diff("line1\nline2\nline3", "line1\nlineX\nline3");
    assert_eq!((result.additions, result.deletions), (1, 1));
    assert_eq!(result.hunks.len(), 1);
    assert_eq!(
        format_diff(&result, "a/f", "b/f"),
        "--- a/f\n+++ b/f\n@@ -1,3 +1,3 @@\n line1\n-line2\n+lineX\n line3"
    );
}

// ===========================================================================
// Merge properties
// ===========================================================================

#[test]
fn identical_inputs_never_conflict() {
    for text in samples() {
        for base in [None, Some(""), Some("base"), Some(text)] {
            let result = detect_conflicts(text, text, base);
            assert!(!result.has_conflicts);
            assert_eq!(result.merged_content, text);
        }
    }
}

#[test]
fn markers_round_trip_and_resolve_away() {
    for (local, remote) in sample_pairs() {
        for base in [None, Some("unrelated base")] {
            let result = detect_conflicts(local, remote, base);
            if !result.has_conflicts {
                continue;
            }
            let merged = &result.merged_content;
            assert!(has_conflict_markers(merged));
            assert_eq!(count_conflicts(merged), result.conflicts.len());
            assert_eq!(parse_conflicts(merged), result.conflicts);

            for resolution in [Resolution::Local, Resolution::Remote, Resolution::Both] {
                let resolved = resolve_all_conflicts(merged, resolution);
                assert!(!has_conflict_markers(&resolved), "{:?}", resolved);
            }
        }
    }
}

#[test]
fn two_way_scenario_and_resolution() {
    let result = detect_conflicts("a\nb\nc", "a\nB\nc", None);
    assert!(result.has_conflicts);
    assert!(result
        .merged_content
        .contains("<<<<<<< LOCAL\nb\n=======\nB\n>>>>>>> REMOTE"));

    assert_eq!(resolve_all_conflicts(&result.merged_content, Resolution::Local), "a\nb\nc");
    assert_eq!(resolve_all_conflicts(&result.merged_content, Resolution::Remote), "a\nB\nc");
    assert_eq!(
        resolve_all_conflicts(&result.merged_content, Resolution::Both),
        "a\nb\nB\nc"
    );
}

#[test]
fn whole_file_conflict_resolves_to_either_side() {
    let base = "one\ntwo\nthree";
    let local = "ONE\ntwo\nthree";
    let remote = "one\ntwo\nTHREE";
    let result = detect_conflicts(local, remote, Some(base));
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(resolve_all_conflicts(&result.merged_content, Resolution::Local), local);
    assert_eq!(resolve_all_conflicts(&result.merged_content, Resolution::Remote), remote);
}

#[test]
fn three_way_no_change_scenario() {
    let result = detect_conflicts("x", "x", Some("x"));
    assert!(!result.has_conflicts);
    assert_eq!(result.merged_content, "x");
}

#[test]
fn resolve_both_scenario() {
    let block = ConflictBlock {
        start: 0,
        end: 4,
        local: vec!["a".into()],
        remote: vec!["b".into()],
    };
    assert_eq!(resolve_conflict(&block, Resolution::Both), "a\nb");
    assert_eq!(resolve_conflict(&block, Resolution::from("bogus")), "a");
}

#[test]
fn count_scenario() {
    assert_eq!(
        count_conflicts("<<<<<<< LOCAL\nx\n=======\ny\n>>>>>>> REMOTE"),
        1
    );
}

#[test]
fn per_block_resolution_uses_detected_offsets() {
    let local = "keep\nL1\nsync\nL2";
    let remote = "keep\nR1\nsync\nR2";
    let result = detect_conflicts(local, remote, None);
    assert_eq!(result.conflicts.len(), 2);

    let mut choices = BTreeMap::new();
    choices.insert(result.conflicts[1].start, Resolution::Remote);
    let resolved = resolve_conflicts_with(&result.merged_content, &choices, Resolution::Local);
    assert_eq!(resolved, "keep\nL1\nsync\nR2");
}

// ===========================================================================
// Configuration
// ===========================================================================

#[test]
fn engine_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diffmerge.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(
        br#"
[diff]
context_lines = 0

[merge]
local_label = "working copy"
remote_label = "server"
"#,
    )
    .unwrap();

    let config = EngineConfig::load_and_validate(&path).unwrap();
    let merge = MergeEngine::from_config(&config);
    let result = merge.detect_conflicts("a", "b", None);
    assert_eq!(
        result.merged_content,
        "<<<<<<< working copy\na\n=======\nb\n>>>>>>> server"
    );
    assert_eq!(resolve_all_conflicts(&result.merged_content, Resolution::Remote), "b");

    let diff = DiffEngine::new(config.diff.clone());
    let result = diff.calculate_diff("a\nb\nc", "a\nB\nc");
    assert_eq!(result.hunks[0].lines.len(), 2);
}
