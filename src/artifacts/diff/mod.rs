//! Diff hunks and navigation
//!
//! - `hunk`: splitting a unified diff into independently addressable hunks
//! - `diff_target`: what to ask the backend for, and new-file diffs built from disk
//! - `navigator`: the file × hunk cursor used by the review loop

pub mod diff_target;
pub mod hunk;
pub mod navigator;
