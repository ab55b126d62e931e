use crate::domain::version::{SemVer, VersionBump};
use crate::error::VersionError;

/// The three candidate next versions of a single source version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOptions {
    pub patch: String,
    pub minor: String,
    pub major: String,
}

/// Computes the patch, minor and major bumps of `current`.
///
/// Each candidate is derived from its own copy of the parsed version.
pub fn get_bump_options(current: &str) -> Result<BumpOptions, VersionError> {
    let parsed = SemVer::parse(current)?;

    Ok(BumpOptions {
        patch: parsed.bump(VersionBump::Patch)?.to_string(),
        minor: parsed.bump(VersionBump::Minor)?.to_string(),
        major: parsed.bump(VersionBump::Major)?.to_string(),
    })
}

impl BumpOptions {
    /// Resolves a user choice to one of the candidate versions.
    ///
    /// The choice only has to contain the keyword, so both `"minor"` and the
    /// prompt label `"minor (1.1.0)"` resolve. Keywords are checked in the
    /// order patch, minor, major.
    pub fn selected_increment(&self, choice: &str) -> Result<String, VersionError> {
        if choice.contains("patch") {
            return Ok(self.patch.clone());
        }
        if choice.contains("minor") {
            return Ok(self.minor.clone());
        }
        if choice.contains("major") {
            return Ok(self.major.clone());
        }

        Err(VersionError::InvalidIncrementType(choice.to_string()))
    }

    /// Labels shown by the interactive selector, e.g. `"patch (1.0.1)"`.
    pub fn prompt_options(&self) -> Vec<String> {
        vec![
            format!("patch ({})", self.patch),
            format!("minor ({})", self.minor),
            format!("major ({})", self.major),
        ]
    }
}
