use crate::error::{Result, VrsnError};
use git2::{BranchType, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        debug!("opened repository at {}", repo.path().display());

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Makes `path` relative to the working directory root.
    fn relative_path(&self, path: &Path) -> PathBuf {
        match self.repo.workdir() {
            Some(workdir) if path.is_absolute() => path
                .strip_prefix(workdir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        }
    }
}

impl super::VersionControl for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        let name = head
            .shorthand()
            .ok_or_else(|| git2::Error::from_str("HEAD is not valid UTF-8"))?;

        Ok(name.to_string())
    }

    fn file_at_branch(&self, branch: &str, path: &Path) -> Result<String> {
        let relative = self.relative_path(path);
        debug!("reading {} from branch {}", relative.display(), branch);

        let tree = self
            .repo
            .find_branch(branch, BranchType::Local)?
            .get()
            .peel_to_tree()?;
        let entry = tree.get_path(&relative)?;
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;

        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }

    fn tag_names(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        let relative = self.relative_path(path);

        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!("committed {} as {}", relative.display(), oid);

        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| match e.code() {
                git2::ErrorCode::Exists => VrsnError::TagExists(name.to_string()),
                _ => VrsnError::Git(e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::VersionControl;
    use git2::Signature;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        (dir, Git2Repository::from_git2(repo))
    }

    fn commit_all(repo: &Git2Repository, message: &str) {
        let mut index = repo.repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();

        let tree = repo.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let parent = repo.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let (dir, _repo) = init_repo();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        assert!(Git2Repository::open(&nested).is_ok());
    }

    #[test]
    fn test_file_at_branch_reads_committed_contents() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();
        commit_all(&repo, "initial");

        let branch = repo.current_branch().unwrap();
        fs::write(dir.path().join("VERSION"), "1.0.1\n").unwrap();

        let contents = repo.file_at_branch(&branch, Path::new("VERSION")).unwrap();
        assert_eq!(contents, "1.0.0\n");
    }

    #[test]
    fn test_file_at_missing_branch() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();
        commit_all(&repo, "initial");

        assert!(repo
            .file_at_branch("does-not-exist", Path::new("VERSION"))
            .is_err());
    }

    #[test]
    fn test_commit_file_and_tag() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();
        commit_all(&repo, "initial");

        fs::write(dir.path().join("VERSION"), "1.1.0\n").unwrap();
        repo.commit_file(Path::new("VERSION"), "bump version").unwrap();

        let head = repo.repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("bump version"));

        repo.create_tag("1.1.0", "release 1.1.0").unwrap();
        assert_eq!(repo.tag_names().unwrap(), vec!["1.1.0"]);
        assert_eq!(repo.latest_version_tag().unwrap(), "1.1.0");

        assert!(matches!(
            repo.create_tag("1.1.0", "again"),
            Err(VrsnError::TagExists(ref name)) if name == "1.1.0"
        ));
    }
}
