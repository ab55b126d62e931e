use crate::error::VersionError;
use std::fmt;

const PREFIX: &str = "v";
const SEMVER_PARTS: usize = 3;

/// Semantic version representation
///
/// Holds a `major.minor.patch` triple and the optional `v` prefix found on the
/// first segment. The prefix is carried through parse and render unchanged.
/// Ordering compares the numeric components first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prefix: String,
}

/// Names one of the three version segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::Major => "major",
            Segment::Minor => "minor",
            Segment::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Version bump type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl SemVer {
    /// Create a new version without a prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
            prefix: String::new(),
        }
    }

    /// Set the prefix rendered before the major segment
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Parse a version string such as `"1.2.3"` or `"v1.2.3"`.
    ///
    /// Fails with [`VersionError::NoVersionParts`] when there is no `.`,
    /// [`VersionError::WrongPartCount`] when there are not exactly three
    /// segments and [`VersionError::NotANumber`] naming the first segment that
    /// is not a non-negative integer.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if !raw.contains('.') {
            return Err(VersionError::NoVersionParts);
        }

        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != SEMVER_PARTS {
            return Err(VersionError::WrongPartCount { found: parts.len() });
        }

        let (prefix, major_part) = match parts[0].strip_prefix(PREFIX) {
            Some(rest) => (PREFIX, rest),
            None => ("", parts[0]),
        };

        Ok(SemVer {
            major: parse_segment(major_part, Segment::Major)?,
            minor: parse_segment(parts[1], Segment::Minor)?,
            patch: parse_segment(parts[2], Segment::Patch)?,
            prefix: prefix.to_string(),
        })
    }

    /// Increment the patch version.
    pub fn bump_patch(&self) -> Result<Self, VersionError> {
        Ok(SemVer {
            patch: increment(self.patch, Segment::Patch)?,
            ..self.clone()
        })
    }

    /// Increment the minor version and reset patch.
    pub fn bump_minor(&self) -> Result<Self, VersionError> {
        Ok(SemVer {
            minor: increment(self.minor, Segment::Minor)?,
            patch: 0,
            ..self.clone()
        })
    }

    /// Increment the major version and reset minor and patch.
    pub fn bump_major(&self) -> Result<Self, VersionError> {
        Ok(SemVer {
            major: increment(self.major, Segment::Major)?,
            minor: 0,
            patch: 0,
            ..self.clone()
        })
    }

    /// Bump version according to bump type
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self, VersionError> {
        match bump_type {
            VersionBump::Major => self.bump_major(),
            VersionBump::Minor => self.bump_minor(),
            VersionBump::Patch => self.bump_patch(),
        }
    }
}

fn increment(value: u64, segment: Segment) -> Result<u64, VersionError> {
    value
        .checked_add(1)
        .ok_or(VersionError::Overflow { segment })
}

fn parse_segment(value: &str, segment: Segment) -> Result<u64, VersionError> {
    value.parse::<u64>().map_err(|_| VersionError::NotANumber {
        segment,
        value: value.to_string(),
    })
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix, self.major, self.minor, self.patch
        )
    }
}

impl std::str::FromStr for SemVer {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemVer::parse(s)
    }
}
