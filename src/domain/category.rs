use serde::Serialize;

use super::commit::Commit;

/// A changelog section: stable key plus display heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub title: &'static str,
}

/// Key of the bucket for version-like messages.
pub const RELEASE: &str = "release";
/// Key of the bucket for everything unrecognized.
pub const OTHERS: &str = "others";
/// Key whose presence raises the bump to minor.
pub const FEAT: &str = "feat";

/// Every category, in classification and render order.
pub static CATEGORIES: [Category; 13] = [
    // Release related changes
    Category {
        key: RELEASE,
        title: "**:bookmark: Release**",
    },
    // A new feature
    Category {
        key: FEAT,
        title: "**:sparkles: Features**",
    },
    // A bug fix
    Category {
        key: "fix",
        title: "**:bug: Fixes**",
    },
    Category {
        key: "hotfix",
        title: "**:fire_extinguisher: Hotfixes**",
    },
    // A code change that improves performance
    Category {
        key: "perf",
        title: "**:rocket: Performance**",
    },
    Category {
        key: "docs",
        title: "**:books: Documentation**",
    },
    // Formatting and lint only
    Category {
        key: "style",
        title: "**:art: Style**",
    },
    // Neither fixes a bug nor adds a feature
    Category {
        key: "refactor",
        title: "**:arrows_counterclockwise: Refactors**",
    },
    Category {
        key: "test",
        title: "**:vertical_traffic_light: Tests**",
    },
    // Build system or external development dependencies
    Category {
        key: "chore",
        title: "**:gear: Chore**",
    },
    Category {
        key: "build",
        title: "**:package: Build**",
    },
    // CI configuration files and scripts
    Category {
        key: "ci",
        title: "**:robot: CI**",
    },
    Category {
        key: OTHERS,
        title: "**:link: Others**",
    },
];

impl Category {
    /// Fallback categories are never matched by prefix.
    pub fn is_fallback(&self) -> bool {
        self.key == RELEASE || self.key == OTHERS
    }

    /// Categories eligible for conventional prefix matching, in order.
    pub fn prefixed() -> impl Iterator<Item = &'static Category> {
        CATEGORIES.iter().filter(|category| !category.is_fallback())
    }
}

/// Commits collected under one category, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    pub key: &'static str,
    pub title: &'static str,
    pub commits: Vec<Commit>,
}

/// The full, ordered set of buckets for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Buckets {
    buckets: Vec<CategoryBucket>,
}

impl Default for Buckets {
    fn default() -> Self {
        Self::new()
    }
}

impl Buckets {
    /// One empty bucket per category.
    pub fn new() -> Self {
        Buckets {
            buckets: CATEGORIES
                .iter()
                .map(|category| CategoryBucket {
                    key: category.key,
                    title: category.title,
                    commits: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends `commit` to the bucket named `key`, returning the new set.
    ///
    /// Keys come from [`CATEGORIES`]; an unknown key lands in `others` so that
    /// no commit is ever lost.
    pub fn with_commit(mut self, key: &str, commit: Commit) -> Self {
        let index = self
            .buckets
            .iter()
            .position(|bucket| bucket.key == key)
            .or_else(|| self.buckets.iter().position(|bucket| bucket.key == OTHERS))
            .unwrap_or(self.buckets.len() - 1);
        self.buckets[index].commits.push(commit);
        self
    }

    /// Buckets in declared order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryBucket> {
        self.buckets.iter()
    }

    /// Buckets holding at least one commit, in declared order.
    pub fn non_empty(&self) -> impl Iterator<Item = &CategoryBucket> {
        self.buckets.iter().filter(|bucket| !bucket.commits.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|bucket| bucket.key == key)
    }

    /// Number of commits in the bucket named `key`.
    pub fn count(&self, key: &str) -> usize {
        self.get(key).map_or(0, |bucket| bucket.commits.len())
    }

    /// Number of commits across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.commits.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> Commit {
        Commit {
            username: String::new(),
            user_url: String::new(),
            commit_url: "https://example.com/c/1".to_string(),
            message: message.to_string(),
            sha: "1".to_string(),
        }
    }

    #[test]
    fn test_declared_order() {
        let keys: Vec<&str> = CATEGORIES.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![
                "release", "feat", "fix", "hotfix", "perf", "docs", "style", "refactor", "test",
                "chore", "build", "ci", "others"
            ]
        );
    }

    #[test]
    fn test_prefixed_excludes_fallbacks() {
        assert!(Category::prefixed().all(|c| c.key != RELEASE && c.key != OTHERS));
        assert_eq!(Category::prefixed().count(), 11);
    }

    #[test]
    fn test_with_commit_preserves_order() {
        let buckets = Buckets::new()
            .with_commit("fix", commit("fix: a"))
            .with_commit("fix", commit("fix: b"));
        let messages: Vec<&str> = buckets
            .get("fix")
            .unwrap()
            .commits
            .iter()
            .map(|c| c.message.as_str())
            .collect();
        assert_eq!(messages, vec!["fix: a", "fix: b"]);
    }

    #[test]
    fn test_unknown_key_goes_to_others() {
        let buckets = Buckets::new().with_commit("nope", commit("x"));
        assert_eq!(buckets.count(OTHERS), 1);
        assert_eq!(buckets.total(), 1);
    }

    #[test]
    fn test_non_empty_skips_empty_buckets() {
        let buckets = Buckets::new()
            .with_commit("docs", commit("docs: a"))
            .with_commit(RELEASE, commit("1.0.0"));
        let keys: Vec<&str> = buckets.non_empty().map(|b| b.key).collect();
        assert_eq!(keys, vec!["release", "docs"]);
        assert!(Buckets::new().is_empty());
    }
}
