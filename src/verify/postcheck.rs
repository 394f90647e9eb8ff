//! Post-edit verification.
//!
//! Confirms that the manifest declares the target version. Only the
//! declaration line is inspected; every other line is opaque.

use crate::cargo::version::declaration_line;
use crate::error::{BumpError, Result};
use std::fs;
use std::path::Path;

/// Verifies that some line reads exactly `version = "<new_version>"`.
pub fn verify_content(content: &str, new_version: &str) -> Result<()> {
    let expected = declaration_line(new_version);

    let found = content
        .lines()
        .any(|line| line.trim_end_matches('\r') == expected);

    if !found {
        return Err(BumpError::VerificationFailed(format!(
            "no line declaring version \"{}\"",
            new_version
        )));
    }

    Ok(())
}

/// Re-reads `manifest` from disk and verifies it.
pub fn verify_written(manifest: &Path, new_version: &str) -> Result<()> {
    log::info!("Verifying {}", manifest.display());
    let content = fs::read_to_string(manifest)?;
    verify_content(&content, new_version)
}
