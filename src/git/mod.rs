//! Version-control operations.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary, inheriting the user's existing git config, hooks and signing setup.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// What the pipeline needs from version control.
pub trait Vcs {
    /// The staged change set as unified diff text (`git diff --cached`).
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Commit the staged changes with `message`, showing git's own output.
    fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// Check that `git` is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|path| debug!("Using git at {}", path.display()))
        .map_err(|_| GitError::NotInstalled)
}

/// [`Vcs`] backed by the `git` command line.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `workdir` instead of the current directory.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Vcs for GitCli {
    fn staged_diff(&self) -> Result<String, GitError> {
        let output = self
            .command(&["diff", "--cached"])
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: "diff".to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Failed {
                operation: "diff".to_string(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        // `status()` inherits stdin/stdout/stderr, so hooks and editors behave as usual.
        let status = self
            .command(&["commit", "-m", message])
            .status()
            .map_err(|source| GitError::SpawnFailed {
                operation: "commit".to_string(),
                source,
            })?;

        if !status.success() {
            return Err(GitError::Failed {
                operation: "commit".to_string(),
                code: status.code(),
                stderr: "see git output above".to_string(),
            });
        }

        Ok(())
    }
}
