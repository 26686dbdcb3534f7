use crate::areas::repository::Repository;
use crate::artifacts::core::confirm;
use crate::artifacts::message::validator::validate;
use crate::error::WorkflowError;
use colored::Colorize;
use std::io::Write;
use tracing::warn;

impl Repository {
    /// Shows the draft message, or replaces it with `message`.
    ///
    /// An existing pending document only has its message section rewritten;
    /// without one the document is prepared from scratch.
    /// An invalid replacement is only kept after an explicit confirmation
    /// (`assume_yes` answers it).
    pub fn message(&self, message: Option<&str>, assume_yes: bool) -> anyhow::Result<()> {
        let Some(message) = message else {
            return self.show_draft_message();
        };

        writeln!(self.writer(), "\n{} {}", "New commit message:".green(), message)?;

        if let Err(err) = validate(message) {
            writeln!(self.writer(), "{}", format!("Error: {err}").red())?;
            writeln!(self.writer(), "\n{}\n", err.hint())?;

            let keep = assume_yes
                || confirm(
                    &mut **self.reader(),
                    &mut **self.writer(),
                    "Are you sure you want to use the invalid commit message?",
                    false,
                )?;

            if !keep {
                writeln!(
                    self.writer(),
                    "{}",
                    "Commit message update aborted by user.".yellow()
                )?;
                return Err(WorkflowError::Aborted("commit message update").into());
            }

            warn!(error = %err, "keeping an invalid commit message");
        }

        if !self.pending().exists() {
            return self.prepare(Some(message));
        }

        self.pending().write_message(message)?;
        writeln!(
            self.writer(),
            "{} draft message in {}.",
            "Updated".green(),
            self.pending().path().display()
        )?;

        Ok(())
    }

    fn show_draft_message(&self) -> anyhow::Result<()> {
        let draft = self.pending().read_message()?;

        if draft.is_empty() {
            writeln!(self.writer(), "No draft commit message yet.")?;
        } else {
            writeln!(self.writer(), "{}\n\n{}\n", "Current draft message:".green(), draft)?;
        }

        writeln!(
            self.writer(),
            "{} message text is supplied externally, run `gw message \"<type>: <description>\"` to set it.",
            "Note:".yellow()
        )?;

        Ok(())
    }
}
