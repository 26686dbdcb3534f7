use crate::artifacts::status::status_line::resolve_rename;
use std::collections::HashMap;
use tracing::warn;

/// Added and removed line counts of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineDelta {
    pub added: usize,
    pub removed: usize,
}

impl LineDelta {
    pub fn new(added: usize, removed: usize) -> Self {
        LineDelta { added, removed }
    }
}

impl std::ops::AddAssign for LineDelta {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.removed += other.removed;
    }
}

pub type NumstatMap = HashMap<String, LineDelta>;

/// Parses `diff --numstat` output (`added<TAB>removed<TAB>path` per line).
///
/// Binary files (`-` counts) contribute zero; lines that do not have three
/// columns are skipped. Renamed paths are keyed by their new name.
pub fn parse_numstat(output: &str) -> NumstatMap {
    let mut stats = NumstatMap::new();

    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        let mut columns = line.splitn(3, '\t');
        let (added, removed, path) = match (columns.next(), columns.next(), columns.next()) {
            (Some(added), Some(removed), Some(path)) => (added, removed, path),
            _ => {
                warn!(line, "skipping malformed numstat line");
                continue;
            }
        };

        let (path, _) = resolve_rename(path);
        *stats.entry(path).or_default() += LineDelta::new(parse_count(added), parse_count(removed));
    }

    stats
}

fn parse_count(column: &str) -> usize {
    column.trim().parse::<usize>().unwrap_or_default()
}
