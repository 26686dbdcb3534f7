//! Workflow data structures and algorithms
//!
//! - `core`: Shared terminal utilities (pager wrapper, confirmation prompt)
//! - `diff`: Hunk parsing and the hunk navigator
//! - `message`: Conventional Commits parsing and validation
//! - `pending`: The pending document and its change table
//! - `status`: Change records built from git status and numstat output

pub mod core;
pub mod diff;
pub mod message;
pub mod pending;
pub mod status;
