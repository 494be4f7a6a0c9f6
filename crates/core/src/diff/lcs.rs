//! Longest-common-subsequence line alignment.
//!
//! This is a plain O(m·n) dynamic program, not Myers. A changed line comes
//! out as a delete followed by an add; there is no sub-line diffing.

use super::model::DiffLine;

/// Number of cells the LCS table needs for inputs of these lengths.
pub(crate) fn table_cells(old_len: usize, new_len: usize) -> u64 {
    (old_len as u64 + 1).saturating_mul(new_len as u64 + 1)
}

/// Compute the longest common subsequence of two line sequences.
///
/// `dp[i][j]` holds the LCS length of `old[..i]` and `new[..j]`; the table is
/// stored row-major in one allocation and walked back from `dp[m][n]`.
pub(crate) fn longest_common_subsequence<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<&'a str> {
    let m = old.len();
    let n = new.len();
    let width = n + 1;
    let mut dp = vec![0u32; (m + 1) * width];

    for i in 1..=m {
        for j in 1..=n {
            dp[i * width + j] = if old[i - 1] == new[j - 1] {
                dp[(i - 1) * width + (j - 1)] + 1
            } else {
                dp[(i - 1) * width + j].max(dp[i * width + (j - 1)])
            };
        }
    }

    let mut common = Vec::with_capacity(dp[m * width + n] as usize);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if old[i - 1] == new[j - 1] {
            common.push(old[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * width + j] >= dp[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    common.reverse();
    common
}

/// Align `old` against `new` into a flat, numbered line diff.
///
/// Walks old, new and the common subsequence with three cursors. A line
/// equal to the next common line on both sides is context; otherwise the
/// side that does not match it is emitted as a change.
pub(crate) fn line_diff(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let common = longest_common_subsequence(old, new);
    let mut out = Vec::with_capacity(old.len().max(new.len()));

    let (mut i, mut j, mut k) = (0usize, 0usize, 0usize);
    while i < old.len() || j < new.len() {
        let target = common.get(k).copied();
        let old_line = old.get(i).copied();
        let new_line = new.get(j).copied();
        let old_hit = target.is_some() && old_line == target;
        let new_hit = target.is_some() && new_line == target;

        match (old_line, new_line) {
            (Some(o), Some(_)) if old_hit && new_hit => {
                out.push(DiffLine::Context {
                    content: o.to_string(),
                    old_line_number: i + 1,
                    new_line_number: j + 1,
                });
                i += 1;
                j += 1;
                k += 1;
            }
            (_, Some(n)) if old_hit => {
                out.push(add(n, j));
                j += 1;
            }
            (Some(o), _) if new_hit => {
                out.push(delete(o, i));
                i += 1;
            }
            (Some(o), Some(n)) => {
                out.push(delete(o, i));
                out.push(add(n, j));
                i += 1;
                j += 1;
            }
            (Some(o), None) => {
                out.push(delete(o, i));
                i += 1;
            }
            (None, Some(n)) => {
                out.push(add(n, j));
                j += 1;
            }
            (None, None) => break,
        }
    }

    out
}

fn add(content: &str, index: usize) -> DiffLine {
    DiffLine::Add {
        content: content.to_string(),
        new_line_number: index + 1,
    }
}

fn delete(content: &str, index: usize) -> DiffLine {
    DiffLine::Delete {
        content: content.to_string(),
        old_line_number: index + 1,
    }
}
