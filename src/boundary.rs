use std::fmt;

/// Warnings that occur when a commit range or its tags sit at an edge case.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The range between base and head holds no commits
    NoCommits { base: String, head: String },
    /// Every commit in the range was excluded by the scope filter
    ScopeExcludedAll { scope: String, skipped: usize },
    /// Tag has the release prefix but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// No release tag exists; the configured base reference is used instead
    NoReleaseTag { prefix: String, fallback: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoCommits { base, head } => {
                write!(f, "No commits between '{}' and '{}'", base, head)
            }
            BoundaryWarning::ScopeExcludedAll { scope, skipped } => {
                write!(
                    f,
                    "All {} commit(s) were outside scope '{}'; the changelog is empty",
                    skipped, scope
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoReleaseTag { prefix, fallback } => {
                write!(
                    f,
                    "No release tag with prefix '{}' found, using '{}' as base",
                    prefix, fallback
                )
            }
        }
    }
}
