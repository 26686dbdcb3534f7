#![allow(dead_code)]

pub mod command;
pub mod file;

pub const PENDING_DOCUMENT: &str = ".gw-state/pending-changes.md";

pub fn read_pending_document(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(PENDING_DOCUMENT))
        .unwrap_or_else(|e| panic!("Failed to read pending document in {:?}: {}", dir, e))
}
