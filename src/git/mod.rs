//! Commit sources
//!
//! This module provides a trait-based abstraction over where raw commits come
//! from, so the analysis pipeline never depends on a concrete backend.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: a local repository read with the `git2` crate
//! - [snapshot::SnapshotSource]: a saved compare-commits JSON response
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! ```rust
//! # use git_release_notes::git::CommitSource;
//! # fn example<S: CommitSource>(source: &S) -> git_release_notes::Result<()> {
//! let commits = source.commits_between("v1.0.0", "HEAD")?;
//! println!("{} commits to release", commits.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod remote;
pub mod repository;
pub mod snapshot;

pub use mock::MockRepository;
pub use remote::RemoteCoordinates;
pub use repository::Git2Repository;
pub use snapshot::SnapshotSource;

use crate::domain::RawCommit;
use crate::error::Result;

/// Supplier of the raw commits making up a release.
///
/// ## Ordering
///
/// Commits are returned oldest first, `base` excluded and `head` included.
/// Callers never re-sort them.
///
/// ## Error Handling
///
/// Retrieval failures are returned as-is; no retry is attempted.
pub trait CommitSource {
    /// Commits reachable from `head` but not from `base`.
    fn commits_between(&self, base: &str, head: &str) -> Result<Vec<RawCommit>>;

    /// All tag names known to the source, sorted alphabetically.
    ///
    /// Sources without tags return an empty list.
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
