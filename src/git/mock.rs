use crate::error::{Result, VrsnError};
use crate::git::VersionControl;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
///
/// Commits and tags created through the trait are recorded so tests can
/// assert on them.
#[derive(Default)]
pub struct MockRepository {
    branch: String,
    files: HashMap<(String, PathBuf), String>,
    tags: Mutex<Vec<String>>,
    commits: Mutex<Vec<(PathBuf, String)>>,
    annotated_tags: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository on branch "main"
    pub fn new() -> Self {
        MockRepository {
            branch: "main".to_string(),
            ..Default::default()
        }
    }

    /// Set the branch HEAD points at
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Add file contents as they exist on `branch`
    pub fn with_file(
        mut self,
        branch: impl Into<String>,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Self {
        self.files
            .insert((branch.into(), path.into()), contents.into());
        self
    }

    /// Add existing tags
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut existing) = self.tags.lock() {
            existing.extend(tags.into_iter().map(Into::into));
        }
        self
    }

    /// Commits made through [`VersionControl::commit_file`]
    pub fn commits(&self) -> Vec<(PathBuf, String)> {
        self.commits.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Tags made through [`VersionControl::create_tag`], with their messages
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.annotated_tags
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

fn poisoned() -> VrsnError {
    VrsnError::Git(git2::Error::from_str("mock repository lock poisoned"))
}

impl VersionControl for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn file_at_branch(&self, branch: &str, path: &Path) -> Result<String> {
        self.files
            .get(&(branch.to_string(), path.to_path_buf()))
            .cloned()
            .ok_or_else(|| {
                VrsnError::Git(git2::Error::from_str(&format!(
                    "path '{}' does not exist in '{}'",
                    path.display(),
                    branch
                )))
            })
    }

    fn tag_names(&self) -> Result<Vec<String>> {
        Ok(self.tags.lock().map_err(|_| poisoned())?.clone())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        self.commits
            .lock()
            .map_err(|_| poisoned())?
            .push((path.to_path_buf(), message.to_string()));
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut tags = self.tags.lock().map_err(|_| poisoned())?;
        if tags.iter().any(|t| t == name) {
            return Err(VrsnError::TagExists(name.to_string()));
        }
        tags.push(name.to_string());

        self.annotated_tags
            .lock()
            .map_err(|_| poisoned())?
            .push((name.to_string(), message.to_string()));
        Ok(())
    }
}
