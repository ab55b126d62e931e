//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! vrsn needs: reading the current branch, reading the version file as of the
//! base branch, listing version tags, committing the bumped version file and
//! tagging a release.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Workflows depend on the [VersionControl] trait rather than a concrete
//! implementation so they can run against the mock in tests.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::SemVer;
use crate::error::{Result, VrsnError};

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// Implementors must be `Send` so a repository handle can move to another
/// thread. `git2::Repository` is not `Sync`, so sharing is not required.
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [VrsnError] variants.
pub trait VersionControl: Send {
    /// Short name of the branch HEAD points at (e.g. "main")
    fn current_branch(&self) -> Result<String>;

    /// Contents of `path` in the tree at the tip of the local `branch`
    ///
    /// `path` is relative to the repository root.
    fn file_at_branch(&self, branch: &str, path: &Path) -> Result<String>;

    /// All tag names in the repository, in no particular order
    fn tag_names(&self) -> Result<Vec<String>>;

    /// Stage `path` and commit it on HEAD with `message`
    fn commit_file(&self, path: &Path, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Tags whose names parse as a semantic version, sorted ascending
    fn version_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<(SemVer, String)> = self
            .tag_names()?
            .into_iter()
            .filter_map(|tag| SemVer::parse(&tag).ok().map(|version| (version, tag)))
            .collect();

        tags.sort();
        Ok(tags.into_iter().map(|(_, tag)| tag).collect())
    }

    /// The highest semantic version tag
    ///
    /// # Returns
    /// * `Ok(String)` - Tag name of the highest version
    /// * `Err(VrsnError::NoVersionTags)` - If no tag parses as a version
    fn latest_version_tag(&self) -> Result<String> {
        self.version_tags()?
            .pop()
            .ok_or(VrsnError::NoVersionTags)
    }
}
