use crate::areas::repository::Repository;
use crate::artifacts::diff::hunk::HUNK_MARKER;
use crate::artifacts::diff::navigator::HunkNavigator;
use crate::artifacts::message::validator::validate;
use crate::artifacts::pending::table::{NO_CHANGES_DETECTED, format_terminal_table};
use colored::Colorize;
use std::io::Write;
use tracing::debug;

const PROMPT: &str = "[l/n] next file  [h/p] previous file  [k] next change  [j] previous change  [?] help  [q] quit";
const HELP: &str = "\
l, n   show the next file
h, p   show the previous file
k      show the next change of the current file
j      show the previous change of the current file
?      show this help
q      quit the review";

/// One line of input in the review loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewKey {
    NextFile,
    PrevFile,
    NextChange,
    PrevChange,
    Help,
    Quit,
    Unknown,
}

impl ReviewKey {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "l" | "n" => ReviewKey::NextFile,
            "h" | "p" => ReviewKey::PrevFile,
            "k" => ReviewKey::NextChange,
            "j" => ReviewKey::PrevChange,
            "?" => ReviewKey::Help,
            "q" => ReviewKey::Quit,
            _ => ReviewKey::Unknown,
        }
    }
}

impl Repository {
    /// Refreshes the pending document, shows the draft message with its
    /// validation result and walks the changes hunk by hunk.
    ///
    /// `staged` limits the walk to files with staged changes; `print` renders
    /// every hunk at once instead of reading keys. `keylog` echoes every key
    /// read during navigation.
    pub fn review(&self, staged: bool, print: bool, keylog: bool) -> anyhow::Result<()> {
        let all_changes = self.refresh_pending(None)?;
        let changes = if staged {
            self.changes(true)?
        } else {
            all_changes
        };

        let message = self.pending().read_message()?;
        self.show_message_status(&message)?;

        if changes.is_empty() {
            writeln!(self.writer(), "{NO_CHANGES_DETECTED}")?;
            return Ok(());
        }

        let mut navigator = HunkNavigator::new(changes, self);

        if print {
            self.print_all_hunks(&mut navigator)
        } else {
            self.navigate(&mut navigator, keylog)
        }
    }

    fn show_message_status(&self, message: &str) -> anyhow::Result<()> {
        let mut writer = self.writer();
        writeln!(writer, "{}\n\n{}\n", "Commit message:".bold(), message)?;

        match validate(message) {
            Ok(_) => writeln!(writer, "{}\n", "Commit message is valid.".green())?,
            Err(err) => writeln!(
                writer,
                "{}\n\n{}\n",
                format!("Commit message is not valid: {err}").red(),
                err.hint()
            )?,
        }

        Ok(())
    }

    fn print_all_hunks(&self, navigator: &mut HunkNavigator) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format_terminal_table(navigator.changes(), None)
        )?;

        loop {
            loop {
                self.show_current_hunk(navigator)?;
                if !navigator.next_hunk() {
                    break;
                }
            }
            if !navigator.next_file() {
                break;
            }
        }

        Ok(())
    }

    fn navigate(&self, navigator: &mut HunkNavigator, keylog: bool) -> anyhow::Result<()> {
        self.show_screen(navigator)?;

        loop {
            write!(self.writer(), "{} ", PROMPT.dimmed())?;
            self.writer().flush()?;

            let mut input = String::new();
            if self.reader().read_line(&mut input)? == 0 {
                writeln!(self.writer())?;
                break;
            }

            let key = ReviewKey::parse(&input);
            debug!(?key, "review key");
            if keylog {
                writeln!(
                    self.writer(),
                    "{}",
                    format!("Key pressed: {:?} ({key:?})", input.trim()).dimmed()
                )?;
            }

            let moved = match key {
                ReviewKey::NextFile => navigator.next_file(),
                ReviewKey::PrevFile => navigator.prev_file(),
                ReviewKey::NextChange => navigator.next_hunk(),
                ReviewKey::PrevChange => navigator.prev_hunk(),
                ReviewKey::Quit => break,
                ReviewKey::Help => {
                    writeln!(self.writer(), "{HELP}")?;
                    continue;
                }
                ReviewKey::Unknown => {
                    writeln!(self.writer(), "Unknown key {:?}, press ? for help.", input.trim())?;
                    continue;
                }
            };

            if moved {
                self.show_screen(navigator)?;
            } else {
                writeln!(self.writer(), "{}", "Nothing further in that direction.".dimmed())?;
            }
        }

        Ok(())
    }

    fn show_screen(&self, navigator: &mut HunkNavigator) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "\n{}",
            format_terminal_table(navigator.changes(), Some(navigator.file_index()))
        )?;

        self.show_current_hunk(navigator)
    }

    fn show_current_hunk(&self, navigator: &mut HunkNavigator) -> anyhow::Result<()> {
        let text = navigator.current_diff_text().to_string();
        let path = navigator
            .current_change()
            .map(|change| change.path.clone())
            .unwrap_or_default();
        let count = navigator.hunk_count().unwrap_or_default();
        let position = if count == 0 { 0 } else { navigator.hunk_index() + 1 };

        let mut writer = self.writer();
        writeln!(
            writer,
            "\n{}",
            format!("Diff View ({path}) - Change {position}/{count}").bold()
        )?;
        for line in text.lines() {
            writeln!(writer, "{}", colorize_diff_line(line))?;
        }

        Ok(())
    }
}

fn colorize_diff_line(line: &str) -> String {
    if line.starts_with(HUNK_MARKER) {
        line.cyan().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else {
        line.to_string()
    }
}
