use crate::conventional;
use crate::domain::category::FEAT;
use crate::domain::{Buckets, RawCommit, VersionType};
use crate::error::Result;
use crate::git::CommitSource;
use crate::references::{ReferenceExtractor, References};

/// Outcome of one pass over a commit range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub buckets: Buckets,
    pub references: References,
    /// Flat commits dropped by the scope filter.
    pub out_of_scope: usize,
}

impl Analysis {
    /// Minimum bump implied by the classified commits.
    ///
    /// Any `feat` raises patch to minor; a `#MAJOR` marker forces major.
    pub fn version_type(&self) -> VersionType {
        let mut version_type = VersionType::Patch;
        if self.buckets.count(FEAT) > 0 {
            version_type = version_type.at_least_minor();
        }
        if self.references.major {
            version_type = VersionType::Major;
        }
        version_type
    }

    /// Number of flat commits that reached a bucket.
    pub fn classified(&self) -> usize {
        self.buckets.total()
    }
}

/// Classifies commit ranges into changelog buckets and collects references.
pub struct ChangelogAnalyzer {
    extractor: ReferenceExtractor,
    scope: Option<String>,
}

impl ChangelogAnalyzer {
    /// Create a new analyzer for the given task prefix and optional scope filter
    pub fn new(task_prefix: &str, scope: Option<&str>) -> Result<Self> {
        Ok(ChangelogAnalyzer {
            extractor: ReferenceExtractor::new(task_prefix)?,
            scope: scope.map(str::to_string),
        })
    }

    /// Retrieve the commits between `base` and `head` from `source` and analyze them
    pub fn analyze_range<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        base: &str,
        head: &str,
    ) -> Result<Analysis> {
        let commits = source.commits_between(base, head)?;
        Ok(self.analyze(&commits))
    }

    /// Analyze commits in the order given
    pub fn analyze(&self, commits: &[RawCommit]) -> Analysis {
        let analysis = commits
            .iter()
            .fold(Analysis::default(), |analysis, commit| self.absorb(analysis, commit));

        tracing::debug!(
            commits = commits.len(),
            classified = analysis.classified(),
            out_of_scope = analysis.out_of_scope,
            version_type = %analysis.version_type(),
            "analyzed commit range"
        );
        analysis
    }

    /// Folds one raw commit into the accumulator.
    ///
    /// References come from the original message; classification runs per
    /// flat commit after squash expansion.
    fn absorb(&self, analysis: Analysis, raw: &RawCommit) -> Analysis {
        let Analysis {
            buckets,
            references,
            out_of_scope,
        } = analysis;
        let references = references.merge(self.extractor.extract(raw.message()));

        let (buckets, out_of_scope) = raw.normalize().into_iter().fold(
            (buckets, out_of_scope),
            |(buckets, dropped), commit| {
                match conventional::classify(&commit.message, self.scope.as_deref()) {
                    Some(key) => (buckets.with_commit(key, commit), dropped),
                    None => {
                        tracing::debug!(sha = %commit.sha, "commit outside scope, skipped");
                        (buckets, dropped + 1)
                    }
                }
            },
        );

        Analysis {
            buckets,
            references,
            out_of_scope,
        }
    }
}
