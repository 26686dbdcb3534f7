use crate::artifacts::status::change_set::ChangeRecord;
use colored::Colorize;

pub const HEADERS: [&str; 6] = ["File", "Status", "Added", "Removed", "% Changed", "Description"];
pub const NO_CHANGES_DETECTED: &str = "No changes detected.";

type Row = [String; 6];

fn row(change: &ChangeRecord) -> Row {
    [
        change.path.clone(),
        change.status_label(),
        change.lines_added.to_string(),
        change.lines_removed.to_string(),
        format!("{:.1}%", change.percent_changed),
        change.description.clone(),
    ]
}

fn column_widths(rows: &[Row]) -> [usize; 6] {
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn format_cells<S: AsRef<str>>(cells: &[S], widths: &[usize; 6]) -> String {
    let cells = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!(" {:<width$} ", cell.as_ref(), width = *width))
        .collect::<Vec<_>>();

    format!("|{}|", cells.join("|"))
}

/// Pipe table of the change set with columns padded to a common width.
pub fn format_markdown_table(changes: &[ChangeRecord]) -> String {
    if changes.is_empty() {
        return NO_CHANGES_DETECTED.to_string();
    }

    let rows = changes.iter().map(row).collect::<Vec<_>>();
    let widths = column_widths(&rows);
    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("|");

    let mut lines = vec![format_cells(&HEADERS, &widths), format!("|{separator}|")];
    lines.extend(rows.iter().map(|row| format_cells(row, &widths)));

    lines.join("\n")
}

/// Same layout as [`format_markdown_table`] for the terminal, with the row at
/// `current` highlighted.
pub fn format_terminal_table(changes: &[ChangeRecord], current: Option<usize>) -> String {
    if changes.is_empty() {
        return NO_CHANGES_DETECTED.to_string();
    }

    let rows = changes.iter().map(row).collect::<Vec<_>>();
    let widths = column_widths(&rows);

    let mut lines = vec![format_cells(&HEADERS, &widths).bold().to_string()];
    lines.extend(rows.iter().enumerate().map(|(idx, row)| {
        let line = format_cells(row, &widths);
        if Some(idx) == current {
            line.bold().reversed().to_string()
        } else {
            line
        }
    }));

    lines.join("\n")
}
