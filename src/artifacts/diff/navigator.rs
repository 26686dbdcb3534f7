//! Two-dimensional cursor over a change set
//!
//! The navigator walks files of a change list and, inside the current file,
//! the hunks of its diff. Hunks are parsed lazily:
//!
//! ```text
//! NoHunksLoaded --(next_hunk / prev_hunk / current_diff_text)--> HunksLoaded { index }
//! HunksLoaded   --(next_file / prev_file moved)----------------> NoHunksLoaded
//! ```
//!
//! Changing the file always discards the parsed hunks; stepping inside a file
//! never leaves `0..hunks.len()`.

use crate::artifacts::diff::hunk::{DiffHunk, parse_hunks};
use crate::artifacts::status::change_set::ChangeRecord;
use tracing::warn;

pub const NO_CHANGES: &str = "No changes to display";

/// Source of the unified diff text of one change.
pub trait DiffProvider {
    fn file_diff(&self, change: &ChangeRecord) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HunkState {
    #[default]
    NoHunksLoaded,
    HunksLoaded { hunks: Vec<DiffHunk>, index: usize },
}

pub struct HunkNavigator<'p> {
    changes: Vec<ChangeRecord>,
    provider: &'p dyn DiffProvider,
    file_index: usize,
    state: HunkState,
}

impl<'p> HunkNavigator<'p> {
    pub fn new(changes: Vec<ChangeRecord>, provider: &'p dyn DiffProvider) -> Self {
        HunkNavigator {
            changes,
            provider,
            file_index: 0,
            state: HunkState::NoHunksLoaded,
        }
    }

    pub fn changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    pub fn file_index(&self) -> usize {
        self.file_index
    }

    pub fn state(&self) -> &HunkState {
        &self.state
    }

    pub fn current_change(&self) -> Option<&ChangeRecord> {
        self.changes.get(self.file_index)
    }

    pub fn hunk_index(&self) -> usize {
        match &self.state {
            HunkState::HunksLoaded { index, .. } => *index,
            HunkState::NoHunksLoaded => 0,
        }
    }

    /// Number of hunks of the current file, `None` until they are loaded.
    pub fn hunk_count(&self) -> Option<usize> {
        match &self.state {
            HunkState::HunksLoaded { hunks, .. } => Some(hunks.len()),
            HunkState::NoHunksLoaded => None,
        }
    }

    pub fn next_file(&mut self) -> bool {
        if self.file_index + 1 >= self.changes.len() {
            return false;
        }

        self.select_file(self.file_index + 1);
        true
    }

    pub fn prev_file(&mut self) -> bool {
        if self.file_index == 0 {
            return false;
        }

        self.select_file(self.file_index - 1);
        true
    }

    pub fn next_hunk(&mut self) -> bool {
        match self.load_hunks() {
            HunkState::HunksLoaded { hunks, index } if *index + 1 < hunks.len() => {
                *index += 1;
                true
            }
            _ => false,
        }
    }

    pub fn prev_hunk(&mut self) -> bool {
        match self.load_hunks() {
            HunkState::HunksLoaded { index, .. } if *index > 0 => {
                *index -= 1;
                true
            }
            _ => false,
        }
    }

    /// Content of the active hunk, or [`NO_CHANGES`] when the file has none.
    pub fn current_diff_text(&mut self) -> &str {
        match self.load_hunks() {
            HunkState::HunksLoaded { hunks, index } => hunks
                .get(*index)
                .map(|hunk| hunk.content.as_str())
                .unwrap_or(NO_CHANGES),
            HunkState::NoHunksLoaded => NO_CHANGES,
        }
    }

    fn select_file(&mut self, file_index: usize) {
        self.file_index = file_index;
        self.state = HunkState::NoHunksLoaded;
    }

    fn load_hunks(&mut self) -> &mut HunkState {
        if self.state == HunkState::NoHunksLoaded
            && let Some(change) = self.changes.get(self.file_index)
        {
            let hunks = match self.provider.file_diff(change) {
                Ok(diff) => parse_hunks(&diff),
                Err(err) => {
                    warn!(path = %change.path, error = %err, "cannot load diff, showing no hunks");
                    Vec::new()
                }
            };
            self.state = HunkState::HunksLoaded { hunks, index: 0 };
        }

        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::status::file_change::{DiffSources, FileStatus};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct CannedDiffs {
        diffs: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl DiffProvider for CannedDiffs {
        fn file_diff(&self, change: &ChangeRecord) -> anyhow::Result<String> {
            self.requests.borrow_mut().push(change.path.clone());
            self.diffs
                .get(&change.path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no diff for {}", change.path))
        }
    }

    fn change(path: &str) -> ChangeRecord {
        ChangeRecord {
            path: path.to_string(),
            status: FileStatus::try_parse(" M").unwrap(),
            sources: DiffSources::WORKING,
            lines_added: 1,
            lines_removed: 1,
            percent_changed: 10.0,
            description: String::new(),
            old_path: None,
        }
    }

    fn changes(count: usize) -> Vec<ChangeRecord> {
        (0..count).map(|i| change(&format!("file{i}.rs"))).collect()
    }

    fn canned() -> CannedDiffs {
        CannedDiffs {
            diffs: HashMap::from([
                (
                    "file0.rs".to_string(),
                    "--- a/file0.rs\n+++ b/file0.rs\n@@ -1 +1 @@\n-a\n+b\n@@ -9 +9 @@\n-c\n+d\n"
                        .to_string(),
                ),
                ("file1.rs".to_string(), String::new()),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn step_through_hunks_within_bounds() {
        let provider = canned();
        let mut navigator = HunkNavigator::new(changes(2), &provider);

        assert_eq!(navigator.current_diff_text(), "@@ -1 +1 @@\n-a\n+b\n");
        assert!(!navigator.prev_hunk());
        assert!(navigator.next_hunk());
        assert_eq!(navigator.hunk_index(), 1);
        assert_eq!(navigator.current_diff_text(), "@@ -9 +9 @@\n-c\n+d\n");
        assert!(!navigator.next_hunk());
        assert!(navigator.prev_hunk());
        assert_eq!(navigator.hunk_index(), 0);
    }

    #[test]
    fn changing_file_resets_hunks() {
        let provider = canned();
        let mut navigator = HunkNavigator::new(changes(2), &provider);

        navigator.next_hunk();
        assert_eq!(navigator.hunk_count(), Some(2));

        assert!(navigator.next_file());
        assert_eq!(navigator.state(), &HunkState::NoHunksLoaded);
        assert_eq!(navigator.hunk_index(), 0);
        assert_eq!(navigator.current_diff_text(), NO_CHANGES);
        assert_eq!(navigator.hunk_count(), Some(0));

        assert!(navigator.prev_file());
        assert_eq!(navigator.hunk_index(), 0);
        assert_eq!(navigator.current_diff_text(), "@@ -1 +1 @@\n-a\n+b\n");
    }

    #[test]
    fn hunks_are_parsed_once_per_file_selection() {
        let provider = canned();
        let mut navigator = HunkNavigator::new(changes(2), &provider);

        navigator.next_hunk();
        navigator.prev_hunk();
        navigator.current_diff_text();

        assert_eq!(provider.requests.borrow().len(), 1);
    }

    #[test]
    fn provider_failure_degrades_to_no_changes() {
        let provider = canned();
        let mut navigator = HunkNavigator::new(changes(3), &provider);
        navigator.next_file();
        navigator.next_file();

        assert!(!navigator.next_hunk());
        assert_eq!(navigator.current_diff_text(), NO_CHANGES);
    }

    #[test]
    fn empty_change_list_never_moves() {
        let provider = CannedDiffs::default();
        let mut navigator = HunkNavigator::new(Vec::new(), &provider);

        assert!(!navigator.next_file());
        assert!(!navigator.prev_file());
        assert!(!navigator.next_hunk());
        assert!(!navigator.prev_hunk());
        assert_eq!(navigator.current_change(), None);
        assert_eq!(navigator.current_diff_text(), NO_CHANGES);
    }

    proptest! {
        #[test]
        fn file_stepping_is_bounded_and_mirrored(count in 1usize..40) {
            let provider = CannedDiffs::default();
            let mut navigator = HunkNavigator::new(changes(count), &provider);

            for _ in 0..count - 1 {
                prop_assert!(navigator.next_file());
            }
            prop_assert!(!navigator.next_file());
            prop_assert_eq!(navigator.file_index(), count - 1);

            for _ in 0..count - 1 {
                prop_assert!(navigator.prev_file());
            }
            prop_assert!(!navigator.prev_file());
            prop_assert_eq!(navigator.file_index(), 0);
        }
    }
}
