//! Main workflow orchestration logic
//!
//! Resolves the commit range from release tags, runs the analysis and
//! computes the next release version. Kept apart from `main.rs` so the
//! workflow can be driven programmatically without clap.

use semver::Version;

use crate::analyzer::ChangelogAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::changelog::{Links, ReleaseNotes};
use crate::config::Config;
use crate::domain::{bump_version, initial_version, TagPattern};
use crate::error::Result;
use crate::git::{CommitSource, RemoteCoordinates};

/// Arguments for the release-notes workflow
///
/// Mirrors the range-related CLI flags; everything else comes from [`Config`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseNotesArgs {
    /// Explicit base reference; defaults to the latest release tag
    pub base: Option<String>,

    /// Explicit head reference; a release tag here is used as the next tag
    pub head: Option<String>,

    /// Force a pre-release bump
    pub prerelease: bool,
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub notes: ReleaseNotes,

    /// Base reference of the analyzed range
    pub base: String,

    /// Head reference of the analyzed range
    pub head: String,

    /// Latest release tag found, if any
    pub previous_tag: Option<String>,

    pub next_version: Version,

    pub next_tag: String,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release-notes workflow
///
/// 1. Find the latest release tag for the configured prefix
/// 2. Resolve the commit range (base defaults to that tag)
/// 3. Classify commits and extract references
/// 4. Render the notes and compute the next version
pub fn run_release_notes<S: CommitSource + ?Sized>(
    source: &S,
    args: &ReleaseNotesArgs,
    config: &Config,
    coordinates: &RemoteCoordinates,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();
    let pattern = TagPattern::new(config.tag_prefix());

    let tags = source.list_tags()?;
    let latest = pattern.latest(&tags);
    if latest.is_none() {
        warnings.extend(
            tags.iter()
                .filter(|tag| tag.starts_with(&pattern.prefix) && pattern.parse(tag).is_none())
                .map(|tag| BoundaryWarning::UnparsableTag {
                    tag: tag.clone(),
                    reason: "Version number format not recognized".to_string(),
                }),
        );
    }

    let base = match (&args.base, &latest) {
        (Some(base), _) => base.clone(),
        (None, Some((tag, _))) => tag.clone(),
        (None, None) => {
            warnings.push(BoundaryWarning::NoReleaseTag {
                prefix: pattern.prefix.clone(),
                fallback: config.base_ref.clone(),
            });
            config.base_ref.clone()
        }
    };
    let head = args.head.clone().unwrap_or_else(|| "HEAD".to_string());

    let analyzer = ChangelogAnalyzer::new(&config.task_prefix, config.effective_scope())?;
    let commits = source.commits_between(&base, &head)?;
    let analysis = analyzer.analyze(&commits);

    if commits.is_empty() {
        warnings.push(BoundaryWarning::NoCommits {
            base: base.clone(),
            head: head.clone(),
        });
    } else if analysis.classified() == 0 && analysis.out_of_scope > 0 {
        warnings.push(BoundaryWarning::ScopeExcludedAll {
            scope: config.effective_scope().unwrap_or_default().to_string(),
            skipped: analysis.out_of_scope,
        });
    }

    let links = Links::new(
        &config.repository.host_url,
        &coordinates.owner,
        &coordinates.name,
        config.task_base_url.as_deref(),
    );
    let notes = ReleaseNotes::from_analysis(&analysis, &links, args.prerelease);

    let explicit_release = args
        .head
        .as_deref()
        .and_then(|head| pattern.parse(head).map(|version| (head.to_string(), version)));
    let (next_tag, next_version) = match explicit_release {
        Some(release) => release,
        None => {
            let version = match &latest {
                Some((_, current)) => bump_version(current, notes.next_version_type)?,
                None => initial_version(notes.next_version_type),
            };
            (pattern.format(&version), version)
        }
    };

    tracing::info!(
        %base,
        %head,
        version_type = %notes.next_version_type,
        %next_tag,
        "release notes ready"
    );

    Ok(WorkflowResult {
        notes,
        base,
        head,
        previous_tag: latest.map(|(tag, _)| tag),
        next_version,
        next_tag,
        warnings,
    })
}
