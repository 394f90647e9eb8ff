//! Validation rules for version strings.
//!
//! Pure functions with no I/O or side effects (apart from warnings).

use crate::error::{BumpError, Result};
use semver::Version;

const FORBIDDEN_CHARS: &[char] = &['"', '\\', '\r', '\n'];

/// Validates a target version string.
///
/// The version is written verbatim into `version = "..."`, so the only hard
/// rules are the ones that keep that line intact.
///
/// ## Rules
/// - Not empty
/// - No leading or trailing whitespace
/// - No `"`, `\`, or line breaks
///
/// ## Warnings (non-fatal)
/// - Not a valid semver version
pub fn validate_version(version: &str) -> Result<()> {
    if version.trim().is_empty() {
        return Err(BumpError::InvalidVersion(
            version.to_string(),
            "cannot be empty".to_string(),
        ));
    }

    if version.trim() != version {
        return Err(BumpError::InvalidVersion(
            version.to_string(),
            "has leading or trailing whitespace".to_string(),
        ));
    }

    if let Some((idx, ch)) = version
        .char_indices()
        .find(|(_, ch)| FORBIDDEN_CHARS.contains(ch))
    {
        return Err(BumpError::InvalidVersion(
            version.to_string(),
            format!("invalid character {:?} at position {}", ch, idx),
        ));
    }

    if Version::parse(version).is_err() {
        log::warn!("'{}' is not a semver version (Cargo expects MAJOR.MINOR.PATCH)", version);
    }

    Ok(())
}

/// Returns `true` if both versions are semver and `new` sorts below `old`.
pub fn is_downgrade(old: &str, new: &str) -> bool {
    match (Version::parse(old), Version::parse(new)) {
        (Ok(old), Ok(new)) => new < old,
        _ => false,
    }
}

/// Logs a warning when moving to a lower version. Never fails.
pub fn warn_on_downgrade(old: &str, new: &str) {
    if is_downgrade(old, new) {
        log::warn!("'{}' is lower than the current version '{}'", new, old);
    }
}
