//! Staged change collection.

use tracing::debug;

use crate::error::GitError;
use crate::git::Vcs;

/// The staged change set, exactly as git printed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDiff {
    text: String,
}

impl StagedDiff {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when nothing is staged (empty or whitespace-only output).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Paths named by `diff --git a/<path> b/<path>` headers, in diff order.
    pub fn changed_files(&self) -> Vec<&str> {
        self.text
            .lines()
            .filter_map(|line| line.strip_prefix("diff --git "))
            .filter_map(|rest| rest.rsplit_once(" b/").map(|(_, path)| path))
            .collect()
    }
}

/// Read the staged diff from version control.
///
/// An empty result is not an error; callers check [`StagedDiff::is_empty`]
/// and stop before asking the model for anything.
pub fn collect_staged_diff(vcs: &dyn Vcs) -> Result<StagedDiff, GitError> {
    let diff = StagedDiff::new(vcs.staged_diff()?);
    debug!(
        "Staged diff: {} chars, {} files",
        diff.text.len(),
        diff.changed_files().len()
    );
    Ok(diff)
}
