use crate::areas::repository::Repository;
use crate::artifacts::core::confirm;
use crate::artifacts::message::validator::validate;
use crate::error::WorkflowError;
use colored::Colorize;
use std::io::Write;
use tracing::{error, info};

impl Repository {
    /// Commits the index with `message`, or with the draft of the pending document.
    ///
    /// The draft is confirmed interactively unless `assume_yes`; a message passed
    /// in directly needs no confirmation. On success the pending document is removed.
    pub fn commit(
        &self,
        message: Option<&str>,
        amend: bool,
        assume_yes: bool,
    ) -> anyhow::Result<()> {
        if !self.pending().exists() {
            self.refresh_pending(None)?;
        }

        let needs_confirmation = message.is_none() && !assume_yes;
        let message = match message {
            Some(message) => message.trim().to_string(),
            None => self.pending().read_message()?,
        };

        if let Err(err) = validate(&message) {
            writeln!(
                self.writer(),
                "{} Commit message is not valid: {err}",
                "Error:".red()
            )?;
            writeln!(self.writer(), "\n{}", err.hint())?;
            return Err(WorkflowError::InvalidMessage(err).into());
        }

        writeln!(self.writer(), "{}\n{}\n", "Commit message:".green(), message)?;

        if needs_confirmation
            && !confirm(
                &mut **self.reader(),
                &mut **self.writer(),
                "Are you sure you want to commit these changes?",
                true,
            )?
        {
            writeln!(self.writer(), "{}", "Commit aborted by user.".yellow())?;
            return Err(WorkflowError::Aborted("commit").into());
        }

        let summary = self
            .backend()
            .commit(&message, amend)
            .inspect_err(|err| error!(error = %err, "commit failed"))?;
        write!(self.writer(), "{summary}")?;

        self.pending().remove()?;
        self.invalidate_changes();
        info!(amend, "committed pending changes");

        writeln!(self.writer(), "{}", "Changes committed successfully!".green())?;

        Ok(())
    }
}
