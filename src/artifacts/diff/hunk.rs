//! Unified diff hunks
//!
//! A unified diff for one file is a header (`diff --git`, `index`, `---`,
//! `+++`) followed by hunks, each introduced by a `@@ -a,b +c,d @@` marker.
//! [`parse_hunks`] splits the text into those hunks in a single pass, keeping
//! every line byte for byte so the hunks can be shown independently.

use derive_new::new;
use regex::Regex;
use std::sync::LazyLock;

pub const DIFF_HEADER_MARKER: &str = "diff --git";
pub const HUNK_MARKER: &str = "@@";

/// Matches terminal colour and cursor escape sequences (`ESC [ ... letter`).
static ANSI_ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("Invalid ANSI escape regex"));

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffHunk {
    /// First line of the original file the hunk touches, 0 when the marker has none.
    pub start_line: usize,
    /// Raw hunk text, marker line included.
    pub content: String,
}

impl DiffHunk {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// The `@@ ... @@` line the hunk starts with.
    pub fn header(&self) -> &str {
        self.content.lines().next().unwrap_or_default()
    }
}

pub fn strip_ansi(line: &str) -> std::borrow::Cow<'_, str> {
    ANSI_ESCAPE_REGEX.replace_all(line, "")
}

/// Extracts the old-file start line from a hunk marker such as `@@ -12,7 +12,9 @@`.
pub fn parse_start_line(marker: &str) -> usize {
    marker
        .split_once('-')
        .map(|(_, rest)| {
            rest.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .and_then(|digits| digits.parse::<usize>().ok())
        .unwrap_or_default()
}

/// Splits a unified diff into its hunks, in order of appearance.
///
/// File headers are dropped; a `diff --git` line also closes the hunk being
/// accumulated, so the headers of a following file never leak into it.
pub fn parse_hunks(diff: &str) -> Vec<DiffHunk> {
    let mut hunks = Vec::new();
    let mut current: Option<DiffHunk> = None;

    for line in diff.split_inclusive('\n') {
        let bare_line = strip_ansi(line);

        if bare_line.starts_with(DIFF_HEADER_MARKER) {
            hunks.extend(current.take());
        } else if bare_line.starts_with(HUNK_MARKER) {
            hunks.extend(current.take());
            current = Some(DiffHunk::new(
                parse_start_line(&bare_line),
                line.to_string(),
            ));
        } else if let Some(hunk) = current.as_mut() {
            hunk.content.push_str(line);
        }
    }

    hunks.extend(current);
    hunks
}
