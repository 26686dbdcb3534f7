use derive_new::new;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_DIR: &str = ".gw-state";
pub const DEFAULT_PENDING_FILE: &str = "pending-changes.md";
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Settings shared by every workflow command.
///
/// Paths are relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkflowConfig {
    state_dir: PathBuf,
    pending_file: PathBuf,
    context_lines: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            pending_file: PathBuf::from(DEFAULT_PENDING_FILE),
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl WorkflowConfig {
    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = state_dir.into();
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Repository-relative location of the pending document.
    pub fn pending_path(&self) -> PathBuf {
        self.state_dir.join(&self.pending_file)
    }
}
