//! Domain logic - pure release-notes rules independent of git operations

pub mod category;
pub mod commit;
pub mod tag;
pub mod version;

pub use category::{Buckets, Category, CategoryBucket, CATEGORIES};
pub use commit::{Commit, CommitPayload, Identity, RawCommit};
pub use tag::TagPattern;
pub use version::{bump_version, initial_version, VersionType};
