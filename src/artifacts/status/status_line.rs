//! Porcelain status lines
//!
//! `git status --porcelain` prints one `XY PATH` line per entry. Paths with
//! unusual characters are C-quoted, and renames are written either as
//! `old -> new` or, in numeric-diff output, with the brace form
//! `prefix{old => new}suffix`.

use crate::artifacts::status::file_change::FileStatus;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Matches the brace rename syntax: `prefix{old => new}suffix`.
static BRACE_RENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>.*)\{(?P<old>.*) => (?P<new>.*)\}(?P<suffix>.*)$")
        .expect("Invalid brace rename regex")
});

const ARROW_RENAME: &str = " -> ";
const PLAIN_RENAME: &str = " => ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub status: FileStatus,
    pub path: String,
    pub old_path: Option<String>,
}

impl StatusLine {
    /// Parses one porcelain line; `None` for blank, ignored or malformed entries.
    pub fn try_parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let (code, rest) = match (line.get(..2), line.get(2..)) {
            (Some(code), Some(rest)) => (code, rest),
            _ => {
                warn!(line, "skipping malformed status line");
                return None;
            }
        };

        let status = FileStatus::try_parse(code)?;
        let (path, old_path) = resolve_rename(rest.trim());

        if path.is_empty() {
            warn!(line, "skipping status line without a path");
            return None;
        }

        Some(StatusLine {
            status,
            path,
            old_path,
        })
    }
}

/// Splits a (possibly quoted) path column into the final path and, for renames,
/// the path it was renamed from.
pub fn resolve_rename(raw: &str) -> (String, Option<String>) {
    if let Some((old, new)) = split_arrow(raw) {
        let (new, _) = resolve_rename(new);
        return (new, Some(unquote(old)));
    }

    let raw = unquote(raw);

    if let Some(caps) = BRACE_RENAME_REGEX.captures(&raw) {
        let old = format!("{}{}{}", &caps["prefix"], &caps["old"], &caps["suffix"]);
        let new = format!("{}{}{}", &caps["prefix"], &caps["new"], &caps["suffix"]);
        return (collapse_slashes(&new), Some(collapse_slashes(&old)));
    }

    if let Some((old, new)) = raw.split_once(PLAIN_RENAME) {
        return (new.to_string(), Some(old.to_string()));
    }

    (raw, None)
}

// `a -> b` is split outside of quotes only, so quoted names containing the arrow survive.
fn split_arrow(raw: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, c) in raw.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes && raw[idx..].starts_with(ARROW_RENAME) => {
                return Some((&raw[..idx], &raw[idx + ARROW_RENAME.len()..]));
            }
            _ => {}
        }
    }

    None
}

// Empty brace sides (`dir/{ => sub}/file`) leave doubled separators behind.
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = path.replace("//", "/");
    while collapsed.contains("//") {
        collapsed = collapsed.replace("//", "/");
    }
    collapsed.trim_start_matches('/').to_string()
}

/// Removes git's C-style quoting: surrounding double quotes, backslash escapes
/// and octal-escaped bytes.
pub fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    let inner = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner,
        None => return raw.to_string(),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('t') => bytes.push(b'\t'),
            Some('r') => bytes.push(b'\r'),
            Some('"') => bytes.push(b'"'),
            Some('\\') => bytes.push(b'\\'),
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => {
                bytes.push(b'\\');
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::status::file_change::StatusFlags;
    use rstest::rstest;

    #[test]
    fn parse_plain_modified_entry() {
        let line = StatusLine::try_parse(" M src/main.rs").unwrap();

        assert_eq!(line.path, "src/main.rs");
        assert_eq!(line.old_path, None);
        assert_eq!(line.status.working, StatusFlags::MODIFIED);
        assert!(line.status.index.is_unmodified());
    }

    #[test]
    fn parse_arrow_rename_into_single_entry() {
        let line = StatusLine::try_parse("R  old.py -> new.py").unwrap();

        assert_eq!(line.path, "new.py");
        assert_eq!(line.old_path.as_deref(), Some("old.py"));
        assert!(line.status.is_renamed());
    }

    #[test]
    fn parse_quoted_paths() {
        let line = StatusLine::try_parse(r#"?? "with space.txt""#).unwrap();
        assert_eq!(line.path, "with space.txt");

        let line = StatusLine::try_parse(r#"R  "a -> b.txt" -> "c.txt""#).unwrap();
        assert_eq!(line.path, "c.txt");
        assert_eq!(line.old_path.as_deref(), Some("a -> b.txt"));
    }

    #[test]
    fn ignored_and_blank_lines_are_skipped() {
        assert_eq!(StatusLine::try_parse("!! target/"), None);
        assert_eq!(StatusLine::try_parse(""), None);
        assert_eq!(StatusLine::try_parse("M"), None);
    }

    #[rstest]
    #[case("src/{old => new}/lib.rs", "src/new/lib.rs", "src/old/lib.rs")]
    #[case("{a.txt => b.txt}", "b.txt", "a.txt")]
    #[case("dir/{ => sub}/file.rs", "dir/sub/file.rs", "dir/file.rs")]
    #[case("old.rs => new.rs", "new.rs", "old.rs")]
    fn resolve_numstat_rename_syntax(#[case] raw: &str, #[case] new: &str, #[case] old: &str) {
        let (path, old_path) = resolve_rename(raw);

        assert_eq!(path, new);
        assert_eq!(old_path.as_deref(), Some(old));
    }

    #[rstest]
    #[case(r#""tab\there""#, "tab\there")]
    #[case(r#""quote\"d""#, "quote\"d")]
    #[case(r#""caf\303\251.txt""#, "café.txt")]
    #[case("plain.txt", "plain.txt")]
    fn unquote_c_style_paths(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unquote(raw), expected);
    }
}
