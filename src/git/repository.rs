use crate::domain::{CommitPayload, Identity, RawCommit};
use crate::error::{ReleaseNotesError, Result};
use git2::{Oid, Repository as Git2Repo, Signature, Sort};
use std::path::Path;

/// Local repository read through `git2`, exposed as a [`super::CommitSource`].
///
/// Commit permalinks and author profiles point at the web host configured
/// with [`Git2Repository::with_web_links`].
pub struct Git2Repository {
    repo: Git2Repo,
    host_url: String,
    web_url: String,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            host_url: String::new(),
            web_url: String::new(),
        }
    }

    /// Sets the web host (`https://github.com`) and the repository page on it.
    pub fn with_web_links(mut self, host_url: &str, web_url: &str) -> Self {
        self.host_url = host_url.trim_end_matches('/').to_string();
        self.web_url = web_url.trim_end_matches('/').to_string();
        self
    }

    /// URL configured for `remote_name`, if the remote exists.
    pub fn remote_url(&self, remote_name: &str) -> Option<String> {
        let remote = self.repo.find_remote(remote_name).ok()?;
        remote.url().map(str::to_string)
    }

    /// Resolve any revision expression (branch, tag, sha, `HEAD~2`) to a commit
    pub fn resolve(&self, spec: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(spec).map_err(|e| {
            ReleaseNotesError::source(format!("Cannot resolve reference '{}': {}", spec, e))
        })?;
        let commit = object.peel_to_commit().map_err(|e| {
            ReleaseNotesError::source(format!("Reference '{}' is not a commit: {}", spec, e))
        })?;
        Ok(commit.id())
    }

    fn commit_url(&self, sha: &str) -> String {
        if self.web_url.is_empty() {
            sha.to_string()
        } else {
            format!("{}/commit/{}", self.web_url, sha)
        }
    }

    /// Host account behind a signature.
    ///
    /// Only host no-reply addresses (`[<id>+]<login>@users.noreply.<host>`)
    /// identify an account; anything else yields `None`.
    fn identity(&self, signature: &Signature<'_>) -> Option<Identity> {
        let host = self
            .host_url
            .split_once("://")
            .map_or(self.host_url.as_str(), |(_, host)| host);
        if host.is_empty() {
            return None;
        }

        let email = signature.email()?;
        let local = email.strip_suffix(&format!("@users.noreply.{}", host))?;
        let login = local.split_once('+').map_or(local, |(_, login)| login);
        if login.is_empty() {
            return None;
        }

        Some(Identity {
            login: login.to_string(),
            html_url: format!("{}/{}", self.host_url, login),
        })
    }
}

impl super::CommitSource for Git2Repository {
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<RawCommit>> {
        let base_oid = self.resolve(base)?;
        let head_oid = self.resolve(head)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head_oid)?;
        revwalk.hide(base_oid)?;

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let sha = oid.to_string();

            commits.push(RawCommit {
                author: self.identity(&commit.author()),
                committer: self.identity(&commit.committer()),
                html_url: self.commit_url(&sha),
                commit: CommitPayload {
                    message: commit.message().unwrap_or_default().to_string(),
                },
                sha,
            });
        }

        tracing::info!(base, head, commits = commits.len(), "read commit range");
        Ok(commits)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tag_names = self.repo.tag_names(None)?;

        let mut tags: Vec<String> = tag_names.iter().flatten().map(str::to_string).collect();
        tags.sort();
        Ok(tags)
    }
}
