//! The pending document
//!
//! The pending document is the hand-off artifact between workflow commands. It
//! is a markdown file made of a title and three named sections:
//!
//! ````text
//! # Pending Changes (2024-05-01)
//!
//! ## Draft Commit Message
//!
//! feat: add login
//!
//! ## Modified Files
//!
//! | File | Status | ... |
//!
//! ## Detailed Changes
//!
//! ---
//!
//! ### src/login.rs
//! ```diff
//! ...
//! ```
//! ````
//!
//! The document is always parsed into a [`PendingDocument`] and serialized back
//! as a whole; section contents are never spliced by byte offset.

use crate::artifacts::pending::table::format_markdown_table;
use crate::artifacts::status::change_set::ChangeRecord;
use chrono::NaiveDate;

pub const TITLE_PREFIX: &str = "# Pending Changes";
pub const MESSAGE_MARKER: &str = "## Draft Commit Message";
pub const FILES_MARKER: &str = "## Modified Files";
pub const DETAILS_MARKER: &str = "## Detailed Changes";

/// Template offered when no draft message exists yet.
pub const DRAFT_MESSAGE: &str = "type: concise description of changes

[Optional: detailed explanation for complex changes
- Major changes made
- Rationale for changes
- Impact of changes
]";

const STATUS_LEGEND: &str =
    "W - Working Dir | S - Staged | ? - New | A - Added | M - Modified | D - Deleted | R - Renamed";
const MESSAGE_WARNING: &str = "!!!WARNING!!! Please update the commit message before committing!";
const STAGING_WARNING: &str = "!!!WARNING!!! Only staged files will be commited. Please stage changes you wish to commit.";
const DETAIL_SEPARATOR: &str = "---";

/// Diff text of one path, as shown in the detailed changes section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub diff: String,
}

impl FileDiff {
    pub fn new(path: impl Into<String>, diff: impl Into<String>) -> Self {
        FileDiff {
            path: path.into(),
            diff: diff.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingDocument {
    pub title: String,
    pub message: String,
    pub files: String,
    pub details: String,
}

impl PendingDocument {
    pub fn generate(
        date: NaiveDate,
        message: &str,
        changes: &[ChangeRecord],
        diffs: &[FileDiff],
    ) -> Self {
        let files = [
            format_markdown_table(changes).as_str(),
            STATUS_LEGEND,
            MESSAGE_WARNING,
            STAGING_WARNING,
        ]
        .join("\n\n");

        let details = diffs
            .iter()
            .map(|file| {
                format!(
                    "{DETAIL_SEPARATOR}\n\n### {}\n```diff\n{}\n```",
                    file.path,
                    file.diff.trim_end()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        PendingDocument {
            title: format!("{TITLE_PREFIX} ({})", date.format("%Y-%m-%d")),
            message: message.trim().to_string(),
            files,
            details,
        }
    }

    /// Splits a document into its sections.
    ///
    /// The message runs from the first message marker to the last files marker
    /// that precedes the last details marker. Markers only count as whole lines,
    /// so a message quoting them keeps its text. `None` when there is no message
    /// marker at all.
    pub fn parse(content: &str) -> Option<Self> {
        let lines = MarkerLines::scan(content);

        let message_marker = lines.first(MESSAGE_MARKER, 0)?;
        let details_marker = lines.last(DETAILS_MARKER, message_marker.end);
        let files_marker = lines.last_before(
            FILES_MARKER,
            message_marker.end,
            details_marker.map_or(content.len(), |marker| marker.start),
        );

        let message_end = files_marker
            .or(details_marker)
            .map_or(content.len(), |marker| marker.start);
        let files = files_marker.map(|marker| {
            &content[marker.end..details_marker.map_or(content.len(), |details| details.start)]
        });
        let details = details_marker.map(|marker| &content[marker.end..]);

        Some(PendingDocument {
            title: content[..message_marker.start].trim().to_string(),
            message: content[message_marker.end..message_end].trim().to_string(),
            files: files.unwrap_or_default().trim().to_string(),
            details: details.unwrap_or_default().trim().to_string(),
        })
    }

    pub fn serialize(&self) -> String {
        let mut content = format!(
            "{}\n\n{MESSAGE_MARKER}\n\n{}\n\n{FILES_MARKER}\n\n{}\n\n{DETAILS_MARKER}\n",
            self.title, self.message, self.files
        );

        if !self.details.is_empty() {
            content.push('\n');
            content.push_str(&self.details);
            content.push('\n');
        }

        content
    }
}

#[derive(Debug, Clone, Copy)]
struct MarkerLine<'c> {
    text: &'c str,
    start: usize,
    end: usize,
}

/// Byte ranges of every line of a document, for locating whole-line markers.
struct MarkerLines<'c> {
    lines: Vec<MarkerLine<'c>>,
}

impl<'c> MarkerLines<'c> {
    fn scan(content: &'c str) -> Self {
        let mut offset = 0;
        let lines = content
            .split_inclusive('\n')
            .map(|line| {
                let start = offset;
                offset += line.len();
                MarkerLine {
                    text: line.trim_end(),
                    start,
                    end: offset,
                }
            })
            .collect();

        MarkerLines { lines }
    }

    fn matching(
        &self,
        marker: &str,
        from: usize,
    ) -> impl DoubleEndedIterator<Item = &MarkerLine<'c>> {
        self.lines
            .iter()
            .filter(move |line| line.start >= from && line.text == marker)
    }

    fn first(&self, marker: &str, from: usize) -> Option<MarkerLine<'c>> {
        self.matching(marker, from).next().copied()
    }

    fn last(&self, marker: &str, from: usize) -> Option<MarkerLine<'c>> {
        self.matching(marker, from).next_back().copied()
    }

    fn last_before(&self, marker: &str, from: usize, before: usize) -> Option<MarkerLine<'c>> {
        self.matching(marker, from)
            .filter(|line| line.end <= before)
            .next_back()
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::status::file_change::{DiffSources, FileStatus};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn change(path: &str) -> ChangeRecord {
        ChangeRecord {
            path: path.to_string(),
            status: FileStatus::try_parse("M ").unwrap(),
            sources: DiffSources::STAGED,
            lines_added: 2,
            lines_removed: 1,
            percent_changed: 20.0,
            description: String::new(),
            old_path: None,
        }
    }

    #[test]
    fn generated_document_has_sections_in_order() {
        let document = PendingDocument::generate(
            date(),
            "feat: add login\n",
            &[change("src/login.rs")],
            &[FileDiff::new("src/login.rs", "@@ -1 +1 @@\n-a\n+b\n")],
        );
        let content = document.serialize();

        assert!(content.starts_with(
            "# Pending Changes (2024-05-01)\n\n## Draft Commit Message\n\nfeat: add login\n\n## Modified Files\n\n| File"
        ));
        assert!(content.contains(STATUS_LEGEND));
        assert!(content.ends_with(
            "## Detailed Changes\n\n---\n\n### src/login.rs\n```diff\n@@ -1 +1 @@\n-a\n+b\n```\n"
        ));

        let message_at = content.find(MESSAGE_MARKER).unwrap();
        let files_at = content.find(FILES_MARKER).unwrap();
        let details_at = content.find(DETAILS_MARKER).unwrap();
        assert!(message_at < files_at && files_at < details_at);
    }

    #[test]
    fn parse_inverts_serialize() {
        let document = PendingDocument::generate(
            date(),
            "fix(auth): resolve bug\n\nlonger body",
            &[change("a.rs"), change("b.rs")],
            &[FileDiff::new("a.rs", "@@ -3 +3 @@\n-x\n+y")],
        );

        assert_eq!(PendingDocument::parse(&document.serialize()), Some(document));
    }

    #[test]
    fn parse_reads_message_between_markers() {
        let content = "# Pending Changes (2024-05-01)\n\n## Draft Commit Message\n\n  docs: update readme  \n\n## Modified Files\n\nNo changes detected.\n\n## Detailed Changes\n";

        let document = PendingDocument::parse(content).unwrap();

        assert_eq!(document.message, "docs: update readme");
        assert_eq!(document.files, "No changes detected.");
        assert_eq!(document.details, "");
    }

    #[test]
    fn message_quoting_markers_survives_round_trip() {
        let message = "docs: explain layout\n\n## Modified Files\n## Detailed Changes\nare section names";
        let mut document = PendingDocument::generate(date(), "chore: x", &[change("a.rs")], &[]);
        document.message = message.to_string();

        let parsed = PendingDocument::parse(&document.serialize()).unwrap();

        assert_eq!(parsed.message, message);
        assert_eq!(parsed.files, document.files);
    }

    #[test]
    fn documents_without_message_marker_are_rejected() {
        assert_eq!(PendingDocument::parse(""), None);
        assert_eq!(PendingDocument::parse("# Notes\n\njust text\n"), None);
    }

    #[test]
    fn missing_later_sections_leave_message_to_the_end() {
        let document = PendingDocument::parse("## Draft Commit Message\n\nfeat: x\n").unwrap();

        assert_eq!(document.message, "feat: x");
        assert_eq!(document.files, "");
    }

    proptest! {
        #[test]
        fn message_round_trips_modulo_outer_whitespace(message in "\\s{0,3}[a-zA-Z#:() \n-]{0,80}\\s{0,3}") {
            let mut document = PendingDocument::generate(date(), "", &[change("a.rs")], &[]);
            document.message = message.trim().to_string();

            let parsed = PendingDocument::parse(&document.serialize()).unwrap();

            prop_assert_eq!(parsed.message, message.trim());
        }
    }
}
