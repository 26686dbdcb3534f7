use crate::artifacts::pending::document::{FileDiff, PendingDocument};
use crate::artifacts::status::change_set::ChangeRecord;
use crate::error::WorkflowError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The pending document on disk.
///
/// Every write goes through [`PendingDocument::serialize`], and reads parse the
/// whole file, so the document is never edited in place.
#[derive(Debug)]
pub struct PendingStore {
    path: Box<Path>,
}

impl PendingStore {
    pub fn new(path: Box<Path>) -> Self {
        PendingStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn write(
        &self,
        changes: &[ChangeRecord],
        message: &str,
        diffs: &[FileDiff],
    ) -> anyhow::Result<()> {
        let today = chrono::Local::now().date_naive();
        let document = PendingDocument::generate(today, message, changes, diffs);

        self.save(&document)?;
        info!(path = %self.path.display(), files = changes.len(), "wrote pending document");

        Ok(())
    }

    /// Draft message of the document; empty when there is no document or it
    /// has no message section.
    pub fn read_message(&self) -> anyhow::Result<String> {
        Ok(self
            .load()?
            .map(|document| document.message)
            .unwrap_or_default())
    }

    pub fn write_message(&self, message: &str) -> anyhow::Result<()> {
        let mut document = self
            .load()?
            .ok_or_else(|| WorkflowError::MissingPendingDocument(self.path.to_path_buf()))?;

        document.message = message.trim().to_string();
        self.save(&document)?;
        debug!(path = %self.path.display(), "updated draft message");

        Ok(())
    }

    pub fn remove(&self) -> anyhow::Result<()> {
        if !self.exists() {
            return Ok(());
        }

        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove pending document: {:?}", self.path))?;
        info!(path = %self.path.display(), "removed pending document");

        Ok(())
    }

    fn load(&self) -> anyhow::Result<Option<PendingDocument>> {
        if !self.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read pending document: {:?}", self.path))?;

        let document = PendingDocument::parse(&content);
        if document.is_none() {
            warn!(path = %self.path.display(), "pending document has no draft message section");
        }

        Ok(document)
    }

    fn save(&self, document: &PendingDocument) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, document.serialize())
            .with_context(|| format!("Failed to write pending document: {:?}", self.path))
    }
}

impl From<PathBuf> for PendingStore {
    fn from(path: PathBuf) -> Self {
        PendingStore::new(path.into_boxed_path())
    }
}
