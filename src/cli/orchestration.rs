//! Bump and check workflow orchestration
//!
//! The workflows take plain argument structs (already merged with config) and
//! an optional [`VersionControl`] handle, so they can be driven
//! programmatically and tested against [`MockRepository`](crate::git::MockRepository).

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::domain::{compare, get_bump_options};
use crate::error::VrsnError;
use crate::git::VersionControl;
use crate::manifest::finder::VersionFileFinder;
use crate::manifest::{read_version_from_file, read_version_from_str, write_version_to_file};
use crate::ui::{self, BumpSelector};

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Directory searched for the version file
    pub dir: PathBuf,

    /// Explicit version file, relative to `dir`
    pub file: Option<PathBuf>,

    /// `patch`, `minor` or `major`; prompts when `None`
    pub increment: Option<String>,

    /// Commit the version file after writing it
    pub commit: bool,

    pub commit_msg: String,

    /// Create an annotated tag for the new version
    pub git_tag: bool,

    /// Tag annotation, `{version}` is substituted
    pub tag_msg: String,
}

/// Arguments for the check workflow
#[derive(Debug, Clone, PartialEq)]
pub struct CheckWorkflowArgs {
    pub dir: PathBuf,
    pub file: Option<PathBuf>,
    pub was: Option<String>,
    pub now: Option<String>,
    pub base_branch: String,
}

/// Where the bumped version lives
#[derive(Debug, Clone, PartialEq)]
pub enum VersionSource {
    /// A manifest file, relative to the workflow directory
    File(PathBuf),
    /// The latest semantic version tag
    Tag(String),
}

/// Result of a successful bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub was: String,
    pub now: String,
    pub source: VersionSource,
    pub committed: bool,
    /// Name of the tag created, if any
    pub tag: Option<String>,
}

/// Result of a successful check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub was: String,
    pub now: String,
}

/// Bump workflow
///
/// 1. Find the version file, or fall back to the latest version tag
/// 2. Compute the new version from the increment argument or the selector
/// 3. Write it back (file mode)
/// 4. Optionally commit the file and tag the new version
///
/// In tag mode the new version only exists as a tag, so a tag is always
/// created.
pub fn run_bump_workflow(
    args: &BumpWorkflowArgs,
    repo: Option<&dyn VersionControl>,
    selector: &BumpSelector,
) -> Result<BumpOutcome> {
    let version_file = VersionFileFinder::new(&args.dir)
        .with_file_flag(args.file.clone())
        .error_on_no_files(false)
        .find()?;

    let Some(file) = version_file else {
        return bump_latest_tag(args, repo, selector);
    };

    // resolved before anything is written
    let git = if args.commit || args.git_tag {
        Some(repo.ok_or(VrsnError::NoRepository)?)
    } else {
        None
    };

    debug!("reading current version from {}", file.display());
    let was = read_version_from_file(&args.dir, &file)?;
    let now = next_version(&was, args.increment.as_deref(), selector)?;

    write_version_to_file(&args.dir, &file, &now)?;
    debug!("version bumped from {} to {}", was, now);

    let mut committed = false;
    let mut tag = None;

    if let Some(repo) = git {
        if args.commit {
            repo.commit_file(&args.dir.join(&file), &args.commit_msg)?;
            committed = true;
        }

        if args.git_tag {
            repo.create_tag(&now, &tag_message(&args.tag_msg, &now))?;
            tag = Some(now.clone());
        }
    }

    Ok(BumpOutcome {
        was,
        now,
        source: VersionSource::File(file),
        committed,
        tag,
    })
}

fn bump_latest_tag(
    args: &BumpWorkflowArgs,
    repo: Option<&dyn VersionControl>,
    selector: &BumpSelector,
) -> Result<BumpOutcome> {
    let repo = repo.ok_or(VrsnError::NoVersionFilesInDir)?;
    debug!("no version file found, using latest version tag");

    let latest = repo.latest_version_tag()?;
    let now = next_version(&latest, args.increment.as_deref(), selector)?;

    repo.create_tag(&now, &tag_message(&args.tag_msg, &now))?;

    Ok(BumpOutcome {
        was: latest.clone(),
        now: now.clone(),
        source: VersionSource::Tag(latest),
        committed: false,
        tag: Some(now),
    })
}

fn next_version(current: &str, increment: Option<&str>, selector: &BumpSelector) -> Result<String> {
    match increment {
        Some(increment) => {
            let options = get_bump_options(current).map_err(VrsnError::from)?;
            Ok(options
                .selected_increment(increment)
                .map_err(VrsnError::from)?)
        }
        None => selector.select(current),
    }
}

/// Substitutes the new version into a tag message template.
pub fn tag_message(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

/// Check workflow
///
/// Values passed as flags win; an empty flag counts as not passed. A missing
/// `now` is read from the version file. A missing `was` is read from the
/// version file as of the base branch, or from the latest version tag when
/// the directory has no version file.
pub fn run_check_workflow(
    args: &CheckWorkflowArgs,
    repo: Option<&dyn VersionControl>,
) -> Result<CheckOutcome> {
    let was_flag = args.was.clone().filter(|v| !v.is_empty());
    let now_flag = args.now.clone().filter(|v| !v.is_empty());

    let (was, now) = match (was_flag, now_flag) {
        (Some(was), Some(now)) => (was, now),
        (was, now) => resolve_versions(args, was, now, repo)?,
    };

    validate_values(&was, &now)?;

    ui::display_transition(&was, &now);
    compare(&was, &now).map_err(VrsnError::from)?;

    Ok(CheckOutcome { was, now })
}

fn resolve_versions(
    args: &CheckWorkflowArgs,
    was: Option<String>,
    now: Option<String>,
    repo: Option<&dyn VersionControl>,
) -> Result<(String, String)> {
    let version_file = VersionFileFinder::new(&args.dir)
        .with_file_flag(args.file.clone())
        .error_on_no_files(false)
        .find()?;

    let now = match (now, &version_file) {
        (Some(now), _) => now,
        (None, Some(file)) => {
            debug!("reading current version from {}", file.display());
            read_version_from_file(&args.dir, file)?
        }
        (None, None) => return Err(VrsnError::NoNowOrFile.into()),
    };

    let was = match (was, &version_file, repo) {
        (Some(was), _, _) => was,
        (None, Some(file), repo) => {
            let repo = repo.ok_or(VrsnError::NoRepository)?;
            version_at_base_branch(repo, &args.dir, file, &args.base_branch)?
        }
        (None, None, Some(repo)) => {
            debug!("no version file found, using latest version tag");
            repo.latest_version_tag()?
        }
        (None, None, None) => return Err(VrsnError::NoWasOrFile.into()),
    };

    Ok((was, now))
}

fn version_at_base_branch(
    repo: &dyn VersionControl,
    dir: &Path,
    file: &Path,
    base_branch: &str,
) -> Result<String> {
    let current_branch = repo.current_branch()?;
    debug!("current branch: {}", current_branch);

    if current_branch == base_branch {
        return Err(VrsnError::OnBaseBranch(current_branch).into());
    }

    debug!(
        "reading previous version from {} on branch {}",
        file.display(),
        base_branch
    );
    let contents = repo.file_at_branch(base_branch, &dir.join(file))?;

    Ok(read_version_from_str(file, &contents)?)
}

/// Ensures both sides of a check have a value.
pub fn validate_values(was: &str, now: &str) -> std::result::Result<(), VrsnError> {
    match (was.is_empty(), now.is_empty()) {
        (true, true) => Err(VrsnError::MissingValues),
        (true, false) => Err(VrsnError::MissingWas),
        (false, true) => Err(VrsnError::MissingNow),
        (false, false) => Ok(()),
    }
}
