//! Workflow command implementations
//!
//! Every command is an `impl Repository` block under `porcelain`, writing to
//! the repository's writer and reading answers from its reader.

pub mod porcelain;
