use semver::Version;

/// Release tag naming: a fixed prefix followed by a semantic version
/// (e.g. `v1.2.3`, `api@1.2.3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub prefix: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPattern {
            prefix: prefix.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: prefix="v", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Version carried by `tag`, if it has this prefix and a valid version.
    pub fn parse(&self, tag: &str) -> Option<Version> {
        let version = tag.strip_prefix(&self.prefix)?;
        Version::parse(version).ok()
    }

    /// Tag with the highest version among those matching this pattern.
    pub fn latest<'a, I>(&self, tags: I) -> Option<(String, Version)>
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .filter_map(|tag| self.parse(tag).map(|version| (tag.clone(), version)))
            .max_by(|(_, a), (_, b)| a.cmp(b))
    }
}
