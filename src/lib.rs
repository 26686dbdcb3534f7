//! A structured git-commit workflow
//!
//! `gw` inspects the pending modifications of a git working tree, keeps a draft
//! commit message next to a change summary in a pending document, lets the user
//! step through the diff hunk by hunk and finally commits with a message that
//! follows the Conventional Commits convention.
//!
//! - `areas`: repository session, git backend, workspace and pending document store
//! - `artifacts`: change records, hunks, the pending document format and message validation
//! - `commands`: the `prepare`, `review`, `message` and `commit` workflows

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use error::WorkflowError;
