//! Working tree status and change sets
//!
//! This module turns the backend's status and numeric-diff listings into
//! [`change_set::ChangeRecord`]s.
//!
//! ## Components
//!
//! - `file_change`: status flag sets for the index and working-tree axes
//! - `status_line`: porcelain line parsing, quoting and rename syntax
//! - `numstat`: numeric-diff parsing
//! - `change_set`: change records and the builder merging all of the above
//! - `cache`: memoized change sets with explicit invalidation

pub mod cache;
pub mod change_set;
pub mod file_change;
pub mod numstat;
pub mod status_line;
