use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReleaseNotesError, Result};

/// Pre-release channel appended when a release candidate is cut.
const PRERELEASE_CHANNEL: &str = "rc";

/// Version bump type decision.
///
/// `Patch < Minor < Major` are derived from commits; `Prerelease` is only ever
/// requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    #[default]
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl VersionType {
    /// Raises a patch decision to minor; other decisions are kept.
    pub fn at_least_minor(self) -> Self {
        match self {
            VersionType::Patch => VersionType::Minor,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Patch => "patch",
            VersionType::Minor => "minor",
            VersionType::Major => "major",
            VersionType::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First version released when no previous release exists.
pub fn initial_version(version_type: VersionType) -> Version {
    let mut version = Version::new(0, 1, 0);
    if version_type == VersionType::Prerelease {
        version.pre = candidate(0);
    }
    version
}

/// Bumps `current` according to `version_type`.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1, or drop the pre-release of a candidate
/// - **Prerelease**: next candidate number, or patch += 1 with `rc.0`
///
/// Build metadata is always cleared.
pub fn bump_version(current: &Version, version_type: VersionType) -> Result<Version> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;

    match version_type {
        VersionType::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionType::Minor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionType::Patch => {
            if current.pre.is_empty() {
                next.patch += 1;
            }
            next.pre = Prerelease::EMPTY;
        }
        VersionType::Prerelease => {
            if current.pre.is_empty() {
                next.patch += 1;
                next.pre = candidate(0);
            } else {
                next.pre = next_prerelease(&current.pre)?;
            }
        }
    }

    Ok(next)
}

fn candidate(number: u64) -> Prerelease {
    Prerelease::new(&format!("{}.{}", PRERELEASE_CHANNEL, number)).unwrap_or(Prerelease::EMPTY)
}

/// Increments the trailing numeric identifier, or appends `.0` when there is none.
fn next_prerelease(pre: &Prerelease) -> Result<Prerelease> {
    let text = pre.as_str();
    let next = match text.rsplit_once('.') {
        Some((head, tail)) => match tail.parse::<u64>() {
            Ok(number) => format!("{}.{}", head, number + 1),
            Err(_) => format!("{}.0", text),
        },
        None => match text.parse::<u64>() {
            Ok(number) => (number + 1).to_string(),
            Err(_) => format!("{}.0", text),
        },
    };
    Prerelease::new(&next).map_err(|e| {
        ReleaseNotesError::version(format!("Cannot build pre-release '{}': {}", next, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::parse(text).unwrap()
    }

    #[test]
    fn test_at_least_minor() {
        assert_eq!(VersionType::Patch.at_least_minor(), VersionType::Minor);
        assert_eq!(VersionType::Minor.at_least_minor(), VersionType::Minor);
        assert_eq!(VersionType::Major.at_least_minor(), VersionType::Major);
    }

    #[test]
    fn test_version_type_display() {
        assert_eq!(VersionType::default().to_string(), "patch");
        assert_eq!(VersionType::Prerelease.to_string(), "prerelease");
    }

    #[test]
    fn test_bump_major() {
        assert_eq!(bump_version(&v("1.2.3"), VersionType::Major).unwrap(), v("2.0.0"));
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(bump_version(&v("1.2.3"), VersionType::Minor).unwrap(), v("1.3.0"));
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(bump_version(&v("1.2.3"), VersionType::Patch).unwrap(), v("1.2.4"));
    }

    #[test]
    fn test_patch_promotes_candidate() {
        assert_eq!(
            bump_version(&v("1.2.4-rc.3"), VersionType::Patch).unwrap(),
            v("1.2.4")
        );
    }

    #[test]
    fn test_prerelease_from_release() {
        assert_eq!(
            bump_version(&v("1.2.3"), VersionType::Prerelease).unwrap(),
            v("1.2.4-rc.0")
        );
    }

    #[test]
    fn test_prerelease_increments_candidate() {
        assert_eq!(
            bump_version(&v("1.2.4-rc.1"), VersionType::Prerelease).unwrap(),
            v("1.2.4-rc.2")
        );
        assert_eq!(
            bump_version(&v("1.2.4-beta"), VersionType::Prerelease).unwrap(),
            v("1.2.4-beta.0")
        );
    }

    #[test]
    fn test_build_metadata_is_cleared() {
        assert_eq!(
            bump_version(&v("1.0.0+build.5"), VersionType::Minor).unwrap(),
            v("1.1.0")
        );
    }

    #[test]
    fn test_initial_version() {
        assert_eq!(initial_version(VersionType::Minor), v("0.1.0"));
        assert_eq!(initial_version(VersionType::Prerelease), v("0.1.0-rc.0"));
    }
}
