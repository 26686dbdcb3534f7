//! Change records and the change-set builder
//!
//! A change set is the ordered list of [`ChangeRecord`]s describing every path
//! with pending modifications. It is assembled from three backend queries:
//!
//! 1. unstaged and staged numeric diffs (`diff --numstat`, with and without `--cached`)
//! 2. the porcelain status listing, which fixes the order and the status codes
//! 3. the files themselves (or their HEAD version) for the baseline line count
//!
//! ## Percent changed
//!
//! `100 * max(added, removed) / baseline`, clamped to 100 and rounded to two
//! decimals. New and deleted files, as well as files without baseline lines,
//! are always 100% changed.

use crate::areas::backend::Backend;
use crate::areas::workspace::{Workspace, count_lines};
use crate::artifacts::status::file_change::{DiffSources, FileStatus};
use crate::artifacts::status::numstat::{LineDelta, NumstatMap, parse_numstat};
use crate::artifacts::status::status_line::StatusLine;
use derive_new::new;
use std::path::{Component, Path};
use tracing::{debug, error, info, warn};

const GIT_DIR: &str = ".git";

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub path: String,
    pub status: FileStatus,
    pub sources: DiffSources,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub percent_changed: f64,
    pub description: String,
    pub old_path: Option<String>,
}

impl ChangeRecord {
    /// `WS/XY` column: numeric-diff sources, then the porcelain code.
    pub fn status_label(&self) -> String {
        format!("{}/{}", self.sources, self.status)
    }
}

/// Percentage of a file touched by a change, always within `[0, 100]`.
pub fn percent_changed(added: usize, removed: usize, baseline: usize) -> f64 {
    if baseline == 0 {
        return 100.0;
    }

    let percent = 100.0 * added.max(removed) as f64 / baseline as f64;
    (percent.min(100.0) * 100.0).round() / 100.0
}

#[derive(new)]
pub struct ChangeSetBuilder<'r> {
    backend: &'r dyn Backend,
    workspace: &'r Workspace,
    /// Repository-relative state directory; everything below it is excluded.
    state_dir: &'r Path,
}

impl<'r> ChangeSetBuilder<'r> {
    pub fn build(&self, cached_only: bool) -> anyhow::Result<Vec<ChangeRecord>> {
        let unstaged = if cached_only {
            NumstatMap::new()
        } else {
            self.query("unstaged numstat", || self.backend.numstat(false))
                .map(|output| parse_numstat(&output))?
        };
        let staged = self
            .query("staged numstat", || self.backend.numstat(true))
            .map(|output| parse_numstat(&output))?;
        let status = self.query("status", || self.backend.status())?;

        let changes = status
            .lines()
            .filter_map(StatusLine::try_parse)
            .filter(|line| !self.is_excluded(&line.path))
            .filter(|line| !cached_only || !line.status.index.is_unmodified())
            .map(|line| self.build_record(line, &unstaged, &staged))
            .collect::<Vec<_>>();

        info!(count = changes.len(), cached_only, "built change set");

        Ok(changes)
    }

    fn query(
        &self,
        what: &str,
        run: impl FnOnce() -> anyhow::Result<String>,
    ) -> anyhow::Result<String> {
        run().inspect_err(|err| error!(error = %err, "failed to query {what}"))
    }

    fn is_excluded(&self, path: &str) -> bool {
        let path = Path::new(path.trim_end_matches('/'));
        let in_git_dir = matches!(
            path.components().next(),
            Some(Component::Normal(name)) if name == GIT_DIR
        );

        if in_git_dir || path.starts_with(self.state_dir) {
            debug!(path = %path.display(), "skipping workflow-internal path");
            return true;
        }

        false
    }

    fn build_record(
        &self,
        line: StatusLine,
        unstaged: &NumstatMap,
        staged: &NumstatMap,
    ) -> ChangeRecord {
        let mut sources = DiffSources::empty();
        let mut delta = LineDelta::default();

        if let Some(stats) = unstaged.get(&line.path) {
            sources |= DiffSources::WORKING;
            delta += *stats;
        }
        if let Some(stats) = staged.get(&line.path) {
            sources |= DiffSources::STAGED;
            delta += *stats;
        }

        let (delta, percent) = if line.status.is_deleted() {
            let baseline = self.head_line_count(&line.path);
            (LineDelta::new(0, baseline.max(delta.removed)), 100.0)
        } else if line.status.is_new() {
            let baseline = self.workspace_line_count(&line.path);
            (LineDelta::new(baseline, 0), 100.0)
        } else {
            let baseline = self.workspace_line_count(&line.path);
            (delta, percent_changed(delta.added, delta.removed, baseline))
        };

        ChangeRecord {
            description: describe(&line),
            path: line.path,
            status: line.status,
            sources,
            lines_added: delta.added,
            lines_removed: delta.removed,
            percent_changed: percent,
            old_path: line.old_path,
        }
    }

    fn workspace_line_count(&self, path: &str) -> usize {
        self.workspace.line_count(path).unwrap_or_else(|err| {
            warn!(path, error = %err, "cannot count lines, assuming an empty baseline");
            0
        })
    }

    fn head_line_count(&self, path: &str) -> usize {
        match self.backend.show_head(path) {
            Ok(Some(content)) => count_lines(&content),
            Ok(None) => 0,
            Err(err) => {
                warn!(path, error = %err, "cannot read HEAD version, assuming an empty baseline");
                0
            }
        }
    }
}

fn describe(line: &StatusLine) -> String {
    match &line.old_path {
        Some(old_path) => format!("renamed from {old_path}"),
        None if line.status.is_deleted() => "deleted".to_string(),
        None if line.status.is_new() => "new file".to_string(),
        None => String::new(),
    }
}
