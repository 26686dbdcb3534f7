//! Repository components
//!
//! - `backend`: The version-control backend trait and its `git` implementation
//! - `pending`: The pending document on disk
//! - `repository`: The workflow session tying the components together
//! - `workspace`: Working directory file system operations

pub mod backend;
pub mod pending;
pub mod repository;
pub(crate) mod workspace;
