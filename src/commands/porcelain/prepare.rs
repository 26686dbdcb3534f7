use crate::areas::repository::Repository;
use crate::artifacts::pending::document::DRAFT_MESSAGE;
use crate::artifacts::status::change_set::ChangeRecord;
use colored::Colorize;
use std::io::Write;
use tracing::debug;

impl Repository {
    /// Rebuilds the change set and rewrites the pending document.
    ///
    /// The draft message is `message` when given, otherwise the message already
    /// in the document, otherwise the template.
    pub fn prepare(&self, message: Option<&str>) -> anyhow::Result<()> {
        let changes = self.refresh_pending(message)?;

        writeln!(
            self.writer(),
            "{} {} with {} changed file(s).",
            "Updated".green(),
            self.pending().path().display(),
            changes.len()
        )?;

        Ok(())
    }

    pub(crate) fn refresh_pending(
        &self,
        message: Option<&str>,
    ) -> anyhow::Result<Vec<ChangeRecord>> {
        let message = match message {
            Some(message) => message.to_string(),
            None => self.pending().read_message()?,
        };
        let message = if message.trim().is_empty() {
            debug!("no draft message yet, using the template");
            DRAFT_MESSAGE.to_string()
        } else {
            message
        };

        let changes = self.changes(false)?;
        let diffs = self.file_diffs(&changes);
        self.pending().write(&changes, &message, &diffs)?;
        self.invalidate_changes();

        Ok(changes)
    }
}
