//! Git CLI invocation.
//!
//! The two invocation shapes the pipeline needs: one combined log+numstat
//! query over a time window, and one single-commit patch query. Both are
//! blocking child processes with no timeout; an unresponsive git stalls the
//! run, which is acceptable for an offline batch tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use churnscope_core::{ChurnError, Result};

use crate::patch::{extract_lines, CommitPatch};

/// Source of per-commit filtered patch lines.
///
/// The thrash detector only ever sees this trait, so it can be tested with
/// canned patches instead of a live repository.
pub trait PatchSource {
    /// Fetch and filter one commit's added/removed lines.
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::Git`] when the patch cannot be fetched. Callers
    /// treat this as non-fatal for the run.
    fn patch_lines(&self, commit_id: &str) -> Result<CommitPatch>;
}

/// Invokes the `git` binary against one repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use churnscope_pulse::git::GitCli;
///
/// let git = GitCli::new(Path::new("."));
/// let raw = git.raw_log("1 week ago", "now").unwrap();
/// println!("{} bytes of log", raw.len());
/// ```
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Create a client for the repository at `repo`.
    pub fn new(repo: &Path) -> Self {
        Self {
            repo: repo.to_path_buf(),
        }
    }

    /// Run the combined log query over `[after, before]` across all refs.
    ///
    /// Window expressions are handed to git verbatim, so anything git
    /// understands (`"1 week ago"`, `"2026-01-01"`) is accepted. Output is
    /// decoded lossily; git history is not guaranteed to be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::Io`] when git cannot be spawned and
    /// [`ChurnError::Git`] when it exits non-zero. Both are fatal to the
    /// run: nothing can be analyzed without the log.
    pub fn raw_log(&self, after: &str, before: &str) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["log", "--all"])
            .arg(format!("--after={after}"))
            .arg(format!("--before={before}"))
            .args(["--format=raw", "--numstat"])
            .output()?;

        if !output.status.success() {
            return Err(ChurnError::Git(format!(
                "log query failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fetch one commit's unified patch against its parent (`<id>^!`).
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::Io`] or [`ChurnError::Git`] on failure; the
    /// caller skips the commit's line contribution in that case.
    pub fn commit_patch(&self, commit_id: &str) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .arg("diff")
            .arg(format!("{commit_id}^!"))
            .output()?;

        if !output.status.success() {
            return Err(ChurnError::Git(format!(
                "patch query for {commit_id} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PatchSource for GitCli {
    fn patch_lines(&self, commit_id: &str) -> Result<CommitPatch> {
        Ok(extract_lines(&self.commit_patch(commit_id)?))
    }
}
