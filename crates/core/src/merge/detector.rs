//! Conflict detection between a local and a remote version of a file.
//!
//! Without a base the two versions are compared line by line in lockstep.
//! With a base, each side is diffed against it; if both changed, the whole
//! file becomes one conflict block. Concurrent edits are not reconciled at
//! line level.

use tracing::{debug, info, warn};

use super::markers::SEPARATOR;
use super::{ConflictBlock, ConflictResult};
use crate::config::{EngineConfig, MergeConfig};
use crate::diff::DiffEngine;
use crate::errors::MergeError;

/// Stateless merge engine.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    config: MergeConfig,
    diff: DiffEngine,
}

impl MergeEngine {
    pub fn new(config: MergeConfig, diff: DiffEngine) -> Self {
        Self { config, diff }
    }

    /// Build an engine from the `[merge]` and `[diff]` sections.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.merge.clone(), DiffEngine::new(config.diff.clone()))
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Detect conflicts between `local` and `remote`, optionally against a
    /// common `base`.
    ///
    /// Never fails. If detection itself errors, the whole local/remote pair
    /// is returned as a single conflict so the caller still gets something
    /// resolvable.
    pub fn detect_conflicts(&self, local: &str, remote: &str, base: Option<&str>) -> ConflictResult {
        if local == remote {
            debug!("local == remote, nothing to merge");
            return ConflictResult::clean(local);
        }

        match self.try_detect(local, remote, base) {
            Ok(result) => {
                debug!(
                    conflicts = result.conflicts.len(),
                    three_way = base.is_some(),
                    "conflict detection complete"
                );
                result
            }
            Err(err) => {
                warn!(error = %err, "conflict detection failed, marking whole file as conflicted");
                self.whole_file_conflict(local, remote)
            }
        }
    }

    fn try_detect(
        &self,
        local: &str,
        remote: &str,
        base: Option<&str>,
    ) -> Result<ConflictResult, MergeError> {
        match base {
            Some(base) => self.three_way(base, local, remote),
            None => Ok(self.two_way(local, remote)),
        }
    }

    /// Lockstep comparison. Divergent lines are buffered until the two
    /// streams agree again at the same offset, both run out, or a side hits
    /// `max_conflict_lines`.
    fn two_way(&self, local: &str, remote: &str) -> ConflictResult {
        info!("performing two-way conflict detection");

        let local_lines: Vec<&str> = local.split('\n').collect();
        let remote_lines: Vec<&str> = remote.split('\n').collect();
        let cap = self.config.max_conflict_lines.max(1);

        let mut out = MergedOutput::new(&self.config);
        let (mut i, mut j) = (0usize, 0usize);

        while i < local_lines.len() || j < remote_lines.len() {
            match (local_lines.get(i), remote_lines.get(j)) {
                (Some(l), Some(r)) if l == r => {
                    out.push_line(l);
                    i += 1;
                    j += 1;
                    continue;
                }
                _ => {}
            }

            let mut local_buf: Vec<&str> = Vec::new();
            let mut remote_buf: Vec<&str> = Vec::new();
            loop {
                if let Some(line) = local_lines.get(i) {
                    local_buf.push(line);
                    i += 1;
                }
                if let Some(line) = remote_lines.get(j) {
                    remote_buf.push(line);
                    j += 1;
                }

                let realigned = matches!(
                    (local_lines.get(i), remote_lines.get(j)),
                    (Some(l), Some(r)) if l == r
                );
                let exhausted = i >= local_lines.len() && j >= remote_lines.len();
                if realigned || exhausted || local_buf.len() >= cap || remote_buf.len() >= cap {
                    break;
                }
            }

            debug!(
                local = local_buf.len(),
                remote = remote_buf.len(),
                "divergent region"
            );
            out.push_conflict(&local_buf, &remote_buf);
        }

        out.finish()
    }

    fn three_way(&self, base: &str, local: &str, remote: &str) -> Result<ConflictResult, MergeError> {
        info!("performing three-way conflict detection");

        if local == base {
            debug!("local == base, remote wins cleanly");
            return Ok(ConflictResult::clean(remote));
        }
        if remote == base {
            debug!("remote == base, local wins cleanly");
            return Ok(ConflictResult::clean(local));
        }

        // Both sides changed. The base diffs only feed the log line below.
        let local_diff = self
            .diff
            .try_calculate_diff(base, local)
            .map_err(|source| MergeError::BaseDiff {
                side: "local",
                source,
            })?;
        let remote_diff = self
            .diff
            .try_calculate_diff(base, remote)
            .map_err(|source| MergeError::BaseDiff {
                side: "remote",
                source,
            })?;

        debug!(
            local_changes = %local_diff.summary(),
            remote_changes = %remote_diff.summary(),
            "both sides changed, marking whole file"
        );
        Ok(self.whole_file_conflict(local, remote))
    }

    fn whole_file_conflict(&self, local: &str, remote: &str) -> ConflictResult {
        let local_lines: Vec<&str> = local.split('\n').collect();
        let remote_lines: Vec<&str> = remote.split('\n').collect();
        let mut out = MergedOutput::new(&self.config);
        out.push_conflict(&local_lines, &remote_lines);
        out.finish()
    }
}

/// Accumulates merged lines and the blocks written into them.
struct MergedOutput<'c> {
    config: &'c MergeConfig,
    lines: Vec<String>,
    conflicts: Vec<ConflictBlock>,
}

impl<'c> MergedOutput<'c> {
    fn new(config: &'c MergeConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn push_conflict(&mut self, local: &[&str], remote: &[&str]) {
        let start = self.lines.len();
        self.lines.push(format!("<<<<<<< {}", self.config.local_label));
        self.lines.extend(local.iter().map(|l| l.to_string()));
        self.lines.push(SEPARATOR.to_string());
        self.lines.extend(remote.iter().map(|l| l.to_string()));
        self.lines.push(format!(">>>>>>> {}", self.config.remote_label));

        self.conflicts.push(ConflictBlock {
            start,
            end: self.lines.len() - 1,
            local: local.iter().map(|l| l.to_string()).collect(),
            remote: remote.iter().map(|l| l.to_string()).collect(),
        });
    }

    fn finish(self) -> ConflictResult {
        ConflictResult {
            has_conflicts: !self.conflicts.is_empty(),
            merged_content: self.lines.join("\n"),
            conflicts: self.conflicts,
        }
    }
}
