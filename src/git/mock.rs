use crate::domain::{CommitPayload, Identity, RawCommit};
use crate::error::{ReleaseNotesError, Result};
use crate::git::CommitSource;

/// Mock commit source for testing without actual git operations
///
/// Holds a linear history; a range is the commits after the one named by
/// `base` (a tag or sha) up to and including `head`.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<RawCommit>,
    tags: Vec<(String, String)>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Append a commit to the history
    pub fn add_commit(&mut self, commit: RawCommit) {
        self.commits.push(commit);
    }

    /// Append a commit by `login` with the given sha and message
    pub fn commit(&mut self, sha: &str, message: &str, login: Option<&str>) -> &mut Self {
        self.add_commit(RawCommit {
            author: login.map(|login| Identity {
                login: login.to_string(),
                html_url: format!("https://github.com/{}", login),
            }),
            committer: None,
            html_url: format!("https://github.com/acme/widgets/commit/{}", sha),
            commit: CommitPayload {
                message: message.to_string(),
            },
            sha: sha.to_string(),
        });
        self
    }

    /// Add a tag pointing to a commit sha
    pub fn add_tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        self.tags.push((name.into(), sha.into()));
    }

    fn position(&self, reference: &str) -> Option<usize> {
        let sha = self
            .tags
            .iter()
            .find(|(name, _)| name == reference)
            .map_or(reference, |(_, sha)| sha.as_str());
        self.commits.iter().position(|commit| commit.sha == sha)
    }
}

impl CommitSource for MockRepository {
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<RawCommit>> {
        let start = match self.position(base) {
            Some(index) => index + 1,
            None if base.is_empty() => 0,
            None => {
                return Err(ReleaseNotesError::source(format!(
                    "Reference not found: {}",
                    base
                )))
            }
        };
        let end = match head {
            "HEAD" => self.commits.len(),
            _ => self
                .position(head)
                .map(|index| index + 1)
                .ok_or_else(|| ReleaseNotesError::source(format!("Reference not found: {}", head)))?,
        };

        Ok(self
            .commits
            .get(start..end.max(start))
            .map(<[RawCommit]>::to_vec)
            .unwrap_or_default())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self.tags.iter().map(|(name, _)| name.clone()).collect();
        tags.sort();
        Ok(tags)
    }
}
