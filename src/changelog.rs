//! Markdown rendering of classified commits and their references.

use serde::Serialize;

use crate::analyzer::Analysis;
use crate::conventional;
use crate::domain::{Buckets, Commit, VersionType};

/// Link targets for task identifiers and pull requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    /// Tasks render as `<task_base_url>/<task>`.
    pub task_base_url: String,
    /// Pull requests render as `<pull_request_base_url>/<number>`.
    pub pull_request_base_url: String,
}

impl Links {
    /// Links for `owner/name` on `host_url`.
    ///
    /// Without an explicit task tracker, tasks point at the owner's Atlassian site.
    pub fn new(host_url: &str, owner: &str, name: &str, task_base_url: Option<&str>) -> Self {
        let task_base_url = match task_base_url {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("https://{}.atlassian.net/browse", owner),
        };
        Links {
            task_base_url,
            pull_request_base_url: format!(
                "{}/{}/{}/pull",
                host_url.trim_end_matches('/'),
                owner,
                name
            ),
        }
    }
}

/// Rendered changelog body plus the shas it lists, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedChangelog {
    pub markdown: String,
    pub shas: Vec<String>,
}

/// Final release-notes artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNotes {
    pub next_version_type: VersionType,
    pub changes: String,
    pub tasks: String,
    pub pull_requests: String,
    /// Full shas of every rendered line.
    pub change_shas: Vec<String>,
    pub task_ids: Vec<String>,
    pub pull_request_ids: Vec<String>,
}

impl ReleaseNotes {
    /// Renders `analysis`, optionally overriding the bump with a caller-forced
    /// pre-release.
    pub fn from_analysis(analysis: &Analysis, links: &Links, prerelease: bool) -> Self {
        let rendered = render_changelog(&analysis.buckets);
        let next_version_type = if prerelease {
            VersionType::Prerelease
        } else {
            analysis.version_type()
        };

        ReleaseNotes {
            next_version_type,
            changes: rendered.markdown,
            tasks: render_task_links(&analysis.references.tasks, &links.task_base_url),
            pull_requests: render_pull_request_links(
                &analysis.references.pull_requests,
                &links.pull_request_base_url,
            ),
            change_shas: rendered.shas,
            task_ids: analysis.references.tasks.clone(),
            pull_request_ids: analysis.references.pull_requests.clone(),
        }
    }
}

/// Renders non-empty buckets in declared order, each under its title.
pub fn render_changelog(buckets: &Buckets) -> RenderedChangelog {
    let mut markdown = String::new();
    let mut shas = Vec::new();

    for bucket in buckets.non_empty() {
        markdown.push('\n');
        markdown.push_str(bucket.title);
        markdown.push('\n');

        for commit in &bucket.commits {
            markdown.push_str(&format_commit_line(commit));
            markdown.push('\n');
            shas.push(commit.sha.clone());
        }
    }

    RenderedChangelog {
        markdown: markdown.trim().to_string(),
        shas,
    }
}

/// `- <Message> - [<short sha>](<url>)` with an optional author link.
pub fn format_commit_line(commit: &Commit) -> String {
    let mut line = format!(
        "- {} - [{}]({})",
        clean_message(&commit.message),
        commit.short_sha(),
        commit.commit_url
    );
    if commit.has_author() {
        line.push_str(&format!(" ([@{}]({}))", commit.username, commit.user_url));
    }
    line
}

/// First line of `message`, header removed, first character upper-cased.
pub fn clean_message(message: &str) -> String {
    let title = message.lines().next().unwrap_or_default();
    capitalize(&conventional::strip_header(title))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Comma-separated links to the task tracker.
pub fn render_task_links(tasks: &[String], task_base_url: &str) -> String {
    tasks
        .iter()
        .map(|task| format!("[{}]({}/{})", task, task_base_url, task))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated links to pull-request pages.
pub fn render_pull_request_links(pull_requests: &[String], pull_request_base_url: &str) -> String {
    pull_requests
        .iter()
        .map(|number| format!("[#{}]({}/{})", number, pull_request_base_url, number))
        .collect::<Vec<_>>()
        .join(", ")
}
