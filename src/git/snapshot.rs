use crate::domain::RawCommit;
use crate::error::{ReleaseNotesError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Commits from a saved compare-commits response.
///
/// Accepts either the bare `commits` array or the full response object
/// holding it. The snapshot already describes one range, so `base` and
/// `head` are not consulted.
pub struct SnapshotSource {
    path: PathBuf,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Commits(Vec<RawCommit>),
    Comparison { commits: Vec<RawCommit> },
}

impl SnapshotSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SnapshotSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse a snapshot from its JSON text
    pub fn parse(json: &str) -> Result<Vec<RawCommit>> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(match snapshot {
            Snapshot::Commits(commits) | Snapshot::Comparison { commits } => commits,
        })
    }
}

impl super::CommitSource for SnapshotSource {
    fn commits_between(&self, _base: &str, _head: &str) -> Result<Vec<RawCommit>> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            ReleaseNotesError::source(format!(
                "Cannot read commit snapshot '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        let commits = Self::parse(&json)?;
        tracing::info!(path = %self.path.display(), commits = commits.len(), "read commit snapshot");
        Ok(commits)
    }
}
