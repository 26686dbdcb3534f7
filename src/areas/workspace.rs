use anyhow::Context;
use std::path::{Path, PathBuf};

/// Files of the working tree, addressed relative to the repository root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn absolute(&self, file_path: impl AsRef<Path>) -> PathBuf {
        self.path.join(file_path)
    }

    pub fn is_file(&self, file_path: impl AsRef<Path>) -> bool {
        self.absolute(file_path).is_file()
    }

    pub fn read_file(&self, file_path: impl AsRef<Path>) -> anyhow::Result<String> {
        let file_path = self.absolute(file_path);

        let data = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Number of lines of a regular file; anything else (missing, directory) has none.
    pub fn line_count(&self, file_path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let file_path = file_path.as_ref();
        if !self.is_file(file_path) {
            return Ok(0);
        }

        Ok(count_lines(&self.read_file(file_path)?))
    }
}

/// Counts lines the way a line reader would: a trailing fragment without a
/// newline is still a line.
pub fn count_lines(content: &str) -> usize {
    content.split_inclusive('\n').count()
}
