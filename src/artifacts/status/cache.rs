use crate::artifacts::status::change_set::ChangeRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

type CacheKey = (PathBuf, bool);

/// Memoized change sets keyed by `(repository root, cached_only)`.
///
/// Nothing expires on its own: whoever mutates the working tree or the index
/// must call [`ChangeSetCache::invalidate`].
#[derive(Debug, Default)]
pub struct ChangeSetCache {
    entries: HashMap<CacheKey, Vec<ChangeRecord>>,
}

impl ChangeSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        root: &Path,
        cached_only: bool,
        build: impl FnOnce() -> anyhow::Result<Vec<ChangeRecord>>,
    ) -> anyhow::Result<Vec<ChangeRecord>> {
        let key = (root.to_path_buf(), cached_only);

        if let Some(changes) = self.entries.get(&key) {
            debug!(root = %root.display(), cached_only, "serving memoized change set");
            return Ok(changes.clone());
        }

        let changes = build()?;
        self.entries.insert(key, changes.clone());

        Ok(changes)
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
