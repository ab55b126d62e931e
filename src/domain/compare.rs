use crate::domain::version::SemVer;
use crate::error::VersionError;

/// Checks whether `was -> now` is a single legal semantic version bump.
///
/// Identical strings are rejected before any parsing. Parse errors on either
/// side are returned unchanged. The prefix takes no part in the comparison.
pub fn compare(was: &str, now: &str) -> Result<(), VersionError> {
    if was == now {
        return Err(VersionError::VersionNotBumped);
    }

    let was_version = SemVer::parse(was)?;
    let now_version = SemVer::parse(now)?;

    if is_valid_patch(&was_version, &now_version)
        || is_valid_minor(&was_version, &now_version)
        || is_valid_major(&was_version, &now_version)
    {
        return Ok(());
    }

    Err(VersionError::InvalidBump {
        was: was.to_string(),
        now: now.to_string(),
    })
}

/// `now` is `was` with patch incremented by one.
pub fn is_valid_patch(was: &SemVer, now: &SemVer) -> bool {
    now.major == was.major
        && now.minor == was.minor
        && was.patch.checked_add(1) == Some(now.patch)
}

/// `now` is `was` with minor incremented by one and patch reset.
pub fn is_valid_minor(was: &SemVer, now: &SemVer) -> bool {
    now.major == was.major
        && was.minor.checked_add(1) == Some(now.minor)
        && now.patch == 0
}

/// `now` is `was` with major incremented by one and minor and patch reset.
pub fn is_valid_major(was: &SemVer, now: &SemVer) -> bool {
    was.major.checked_add(1) == Some(now.major) && now.minor == 0 && now.patch == 0
}
