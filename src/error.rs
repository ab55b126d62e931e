use std::path::PathBuf;

use thiserror::Error;

use crate::domain::version::Segment;

/// Errors produced by the version model, increment engine and transition validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string does not contain any . splitting version segments")]
    NoVersionParts,

    #[error("invalid number of version parts: expected 3, found {found}")]
    WrongPartCount { found: usize },

    #[error("error converting {segment} version to int: '{value}'")]
    NotANumber { segment: Segment, value: String },

    #[error("version has not been bumped")]
    VersionNotBumped,

    #[error("invalid version bump: {was} -> {now}")]
    InvalidBump { was: String, now: String },

    #[error("cannot bump {segment} version, it is already at the maximum value")]
    Overflow { segment: Segment },

    #[error("invalid increment type: '{0}'")]
    InvalidIncrementType(String),
}

/// Unified error type for vrsn operations
#[derive(Error, Debug)]
pub enum VrsnError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("no version files found in directory")]
    NoVersionFilesInDir,

    #[error(
        "multiple version files found in directory ({}), use the --file flag to select the specific file to use",
        .0.join(", ")
    )]
    MultipleVersionFiles(Vec<String>),

    #[error("version file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("version file is a directory: {}", .0.display())]
    FileIsDirectory(PathBuf),

    #[error("{0} is not a supported version file type")]
    UnsupportedVersionFile(String),

    #[error("unable to read version from {format}")]
    VersionNotFound { format: String },

    #[error("no values provided for --was and --now")]
    MissingValues,

    #[error("no --was value provided")]
    MissingWas,

    #[error("no --now value provided")]
    MissingNow,

    #[error("please pass version with --now flag or run inside a directory that contains a version file")]
    NoNowOrFile,

    #[error("please pass version with --was flag or run inside a directory that contains a version file")]
    NoWasOrFile,

    #[error("on base branch '{0}' with no --was flag supplied, nothing to compare")]
    OnBaseBranch(String),

    #[error("no semantic version tags found in repository")]
    NoVersionTags,

    #[error("not inside a git repository")]
    NoRepository,

    #[error("tag '{0}' already exists")]
    TagExists(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid version pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in vrsn
pub type Result<T> = std::result::Result<T, VrsnError>;

impl VrsnError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VrsnError::Config(msg.into())
    }

    /// Create a "version not found" error for the named manifest format
    pub fn version_not_found(format: impl Into<String>) -> Self {
        VrsnError::VersionNotFound {
            format: format.into(),
        }
    }

    /// Returns the core version error, if this error wraps one.
    pub fn as_version_error(&self) -> Option<&VersionError> {
        match self {
            VrsnError::Version(e) => Some(e),
            _ => None,
        }
    }
}
