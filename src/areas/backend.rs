//! Version-control backend
//!
//! The workflow only needs a handful of primitives from the version-control
//! system. They are expressed by the [`Backend`] trait so the change-set logic can
//! be exercised against canned output, while [`GitCli`] talks to the `git` binary.
//!
//! Every query returns the raw machine-readable text produced by git; parsing is
//! the job of the status artifacts.

use crate::error::WorkflowError;
use derive_new::new;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub trait Backend {
    /// `status --porcelain` output, one entry per line.
    fn status(&self) -> anyhow::Result<String>;

    /// `diff --numstat` output for the working tree, or for the index when `staged`.
    fn numstat(&self, staged: bool) -> anyhow::Result<String>;

    /// Unified diff of `paths` against the last commit with `context` lines.
    fn diff(&self, paths: &[&str], context: usize) -> anyhow::Result<String>;

    /// Content of `path` as recorded in the last commit, `None` if it is not there.
    fn show_head(&self, path: &str) -> anyhow::Result<Option<String>>;

    /// Records the index as a new commit and returns git's summary line.
    fn commit(&self, message: &str, amend: bool) -> anyhow::Result<String>;
}

/// [`Backend`] backed by the `git` executable found on `PATH`.
#[derive(Debug, Clone, new)]
pub struct GitCli {
    root: Box<Path>,
}

impl GitCli {
    fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        debug!(args = ?args, "running git");

        let output = Command::new("git")
            .arg("-C")
            .arg(self.root.as_ref())
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(WorkflowError::Backend {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Backend for GitCli {
    fn status(&self) -> anyhow::Result<String> {
        self.run(&["status", "--porcelain", "--untracked-files=all"])
    }

    fn numstat(&self, staged: bool) -> anyhow::Result<String> {
        if staged {
            self.run(&["diff", "--numstat", "--cached"])
        } else {
            self.run(&["diff", "--numstat"])
        }
    }

    fn diff(&self, paths: &[&str], context: usize) -> anyhow::Result<String> {
        let unified = format!("--unified={context}");
        let mut args = vec!["diff", "--no-color", "-M", unified.as_str(), "HEAD", "--"];
        args.extend_from_slice(paths);

        self.run(&args)
    }

    fn show_head(&self, path: &str) -> anyhow::Result<Option<String>> {
        let object = format!("HEAD:{path}");

        // a path missing from HEAD (or a repository without commits) is not an error here
        match self.run(&["show", object.as_str()]) {
            Ok(content) => Ok(Some(content)),
            Err(err) => {
                debug!(path, error = %err, "path not found in HEAD");
                Ok(None)
            }
        }
    }

    fn commit(&self, message: &str, amend: bool) -> anyhow::Result<String> {
        let mut args = vec!["commit", "-m", message];
        if amend {
            args.push("--amend");
        }

        self.run(&args)
    }
}
