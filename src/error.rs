use crate::artifacts::message::validator::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the workflow commands surface to the user.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),
    #[error("`git {command}` failed: {stderr}")]
    Backend { command: String, stderr: String },
    #[error("no pending document at {0}, run `gw prepare` first")]
    MissingPendingDocument(PathBuf),
    #[error("commit message is not valid: {0}")]
    InvalidMessage(#[from] ValidationError),
    #[error("{0} aborted by user")]
    Aborted(&'static str),
}
