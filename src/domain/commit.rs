use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A body line starting with `* ` marks a squash commit listing its parts.
static SQUASH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* .*\n").expect("Invalid regex"));

/// Delimiter between the logical commits of a squash message.
const SQUASH_DELIMITER: &str = "* ";

/// Host account that authored or committed a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: String,
    pub html_url: String,
}

/// Git-level commit payload as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPayload {
    pub message: String,
}

/// A commit as handed over by a commit source, before normalization.
///
/// Field names follow the compare-commits JSON of the repository host, so a
/// saved API response deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    #[serde(default)]
    pub author: Option<Identity>,
    #[serde(default)]
    pub committer: Option<Identity>,
    pub html_url: String,
    pub commit: CommitPayload,
    pub sha: String,
}

impl RawCommit {
    /// Full, un-split commit message.
    pub fn message(&self) -> &str {
        &self.commit.message
    }

    /// The identity credited for the commit: author first, then committer.
    pub fn identity(&self) -> Option<&Identity> {
        self.author.as_ref().or(self.committer.as_ref())
    }

    /// Whether the message embeds several logical commits (squash merge).
    pub fn is_squash(&self) -> bool {
        SQUASH_LINE.is_match(self.message())
    }

    /// Flattens this record into one or more [`Commit`]s.
    ///
    /// Squash messages are split on `* `; every fragment, the leading text and
    /// empty ones included, becomes its own commit sharing author, URL and sha.
    pub fn normalize(&self) -> Vec<Commit> {
        let (username, user_url) = match self.identity() {
            Some(identity) => (identity.login.clone(), identity.html_url.clone()),
            None => (String::new(), String::new()),
        };
        let template = Commit {
            username,
            user_url,
            commit_url: self.html_url.clone(),
            message: String::new(),
            sha: self.sha.clone(),
        };

        if !self.is_squash() {
            return vec![Commit {
                message: self.message().to_string(),
                ..template
            }];
        }

        let fragments: Vec<Commit> = self
            .message()
            .split(SQUASH_DELIMITER)
            .map(|fragment| template.with_message(fragment.trim()))
            .collect();
        tracing::debug!(
            sha = %self.sha,
            fragments = fragments.len(),
            "expanded squash commit"
        );
        fragments
    }
}

/// A single logical commit, ready for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub username: String,
    pub user_url: String,
    pub commit_url: String,
    pub message: String,
    pub sha: String,
}

impl Commit {
    /// Returns a copy of this commit carrying a different message.
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Commit {
            message: message.into(),
            ..self.clone()
        }
    }

    /// First eight characters of the sha.
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(8) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    /// Author link suffix is only shown when both parts are known.
    pub fn has_author(&self) -> bool {
        !self.username.is_empty() && !self.user_url.is_empty()
    }
}
