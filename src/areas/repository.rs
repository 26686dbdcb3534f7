use crate::areas::backend::{Backend, GitCli};
use crate::areas::pending::PendingStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::diff::diff_target::{diff_paths, new_file_diff};
use crate::artifacts::diff::navigator::DiffProvider;
use crate::artifacts::pending::document::FileDiff;
use crate::artifacts::status::cache::ChangeSetCache;
use crate::artifacts::status::change_set::{ChangeRecord, ChangeSetBuilder};
use crate::artifacts::status::file_change::StatusFlags;
use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use std::cell::{RefCell, RefMut};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const GIT_DIR: &str = ".git";

/// One workflow session over a repository root.
///
/// Owns the output and input streams of the commands, the backend, the pending
/// document store and the change-set memo.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    reader: RefCell<Box<dyn BufRead>>,
    backend: Box<dyn Backend>,
    workspace: Workspace,
    pending: PendingStore,
    changes: RefCell<ChangeSetCache>,
    config: WorkflowConfig,
}

impl Repository {
    /// Opens the repository enclosing `start`, talking to the `git` executable.
    pub fn discover(
        start: &Path,
        config: WorkflowConfig,
        writer: Box<dyn Write>,
        reader: Box<dyn BufRead>,
    ) -> anyhow::Result<Self> {
        let root = find_root(start)?;
        let backend = GitCli::new(root.clone().into_boxed_path());

        Ok(Self::with_backend(
            &root,
            config,
            Box::new(backend),
            writer,
            reader,
        ))
    }

    pub fn with_backend(
        root: &Path,
        config: WorkflowConfig,
        backend: Box<dyn Backend>,
        writer: Box<dyn Write>,
        reader: Box<dyn BufRead>,
    ) -> Self {
        debug!(root = %root.display(), "opening repository");

        Repository {
            path: root.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            reader: RefCell::new(reader),
            backend,
            workspace: Workspace::new(root.to_path_buf().into_boxed_path()),
            pending: PendingStore::from(root.join(config.pending_path())),
            changes: RefCell::new(ChangeSetCache::new()),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn reader(&'_ self) -> RefMut<'_, Box<dyn BufRead>> {
        self.reader.borrow_mut()
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn pending(&self) -> &PendingStore {
        &self.pending
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Current change set, built once per `cached_only` until invalidated.
    pub fn changes(&self, cached_only: bool) -> anyhow::Result<Vec<ChangeRecord>> {
        let state_dir = self
            .config
            .state_dir()
            .strip_prefix(&self.path)
            .unwrap_or(self.config.state_dir());
        let builder = ChangeSetBuilder::new(self.backend(), &self.workspace, state_dir);

        self.changes
            .borrow_mut()
            .get_or_build(&self.path, cached_only, || builder.build(cached_only))
    }

    pub fn invalidate_changes(&self) {
        self.changes.borrow_mut().invalidate();
    }

    /// Diff text of every change, for the detailed section of the pending document.
    ///
    /// A file whose diff cannot be produced is listed with an empty diff.
    pub fn file_diffs(&self, changes: &[ChangeRecord]) -> Vec<FileDiff> {
        changes
            .iter()
            .map(|change| {
                let diff = self.file_diff(change).unwrap_or_else(|err| {
                    warn!(path = %change.path, error = %err, "cannot diff file");
                    String::new()
                });
                FileDiff::new(change.path.as_str(), diff)
            })
            .collect()
    }

    fn synthesized_diff(&self, change: &ChangeRecord) -> anyhow::Result<String> {
        let content = self.workspace.read_file(&change.path)?;
        Ok(new_file_diff(&change.path, &content))
    }
}

impl DiffProvider for Repository {
    fn file_diff(&self, change: &ChangeRecord) -> anyhow::Result<String> {
        if change.status.working.contains(StatusFlags::UNTRACKED) {
            return self.synthesized_diff(change);
        }

        match self
            .backend
            .diff(&diff_paths(change), self.config.context_lines())
        {
            Ok(diff) => Ok(diff),
            // no HEAD yet, or the path is unknown to it
            Err(err) if self.workspace.is_file(&change.path) => {
                debug!(path = %change.path, error = %err, "falling back to a new-file diff");
                self.synthesized_diff(change)
            }
            Err(err) => Err(err),
        }
    }
}

/// Walks from `start` up to the first directory containing `.git`.
pub fn find_root(start: &Path) -> Result<PathBuf, WorkflowError> {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());

    let root = start
        .ancestors()
        .find(|dir| dir.join(GIT_DIR).exists())
        .map(Path::to_path_buf);

    root.ok_or(WorkflowError::NotARepository(start))
}
