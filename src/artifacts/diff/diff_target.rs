use crate::artifacts::status::change_set::ChangeRecord;
use std::fmt::Write;

const NULL_PATH: &str = "/dev/null";
const NEW_FILE_MODE: &str = "100644";

/// Paths handed to the backend when diffing a record; renames include their
/// source so the backend can pair both sides.
pub fn diff_paths(change: &ChangeRecord) -> Vec<&str> {
    match &change.old_path {
        Some(old_path) => vec![old_path.as_str(), change.path.as_str()],
        None => vec![change.path.as_str()],
    }
}

/// Builds the unified diff of a file that has no counterpart in the last
/// commit: every line of `content` is an insertion.
pub fn new_file_diff(path: &str, content: &str) -> String {
    let lines = content.lines().collect::<Vec<_>>();
    let mut diff = String::new();

    // writing into a String cannot fail
    let _ = writeln!(diff, "diff --git a/{path} b/{path}");
    let _ = writeln!(diff, "new file mode {NEW_FILE_MODE}");
    let _ = writeln!(diff, "--- {NULL_PATH}");
    let _ = writeln!(diff, "+++ b/{path}");

    if lines.is_empty() {
        return diff;
    }

    let _ = writeln!(diff, "@@ -0,0 +1,{} @@", lines.len());
    for line in lines {
        let _ = writeln!(diff, "+{line}");
    }

    diff
}
