//! `Cargo.lock` regeneration after a version change.
//!
//! The lock file records the version of every workspace member, so it goes
//! stale as soon as the manifest is bumped. Its format is owned by cargo; this
//! module only finds it and asks cargo to refresh it.
//!
//! Only the lock file at the manifest's workspace root counts. A `Cargo.lock`
//! further up the tree belongs to some other project and is left alone.

use crate::error::{BumpError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const LOCKFILE_NAME: &str = "Cargo.lock";

/// Cargo binary to invoke.
///
/// Uses the `CARGO` environment variable when set, which is the case when
/// running as a cargo subcommand.
fn cargo_program() -> OsString {
    std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"))
}

fn spawn_error(program: &OsString, e: std::io::Error) -> BumpError {
    BumpError::LockRefresh(format!(
        "could not run '{}': {}",
        program.to_string_lossy(),
        e
    ))
}

/// Returns the nearest `Cargo.lock` at or above the manifest's directory.
fn nearest_lockfile(manifest: &Path) -> Option<PathBuf> {
    let start = manifest.parent()?;
    start
        .ancestors()
        .map(|dir| dir.join(LOCKFILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Asks cargo for the directory holding the workspace root manifest.
///
/// Returns `None` when cargo cannot resolve the workspace (for instance when
/// the manifest is not one cargo accepts).
fn workspace_root(manifest: &Path) -> Result<Option<PathBuf>> {
    let cargo = cargo_program();

    let mut cmd = Command::new(&cargo);
    cmd.arg("locate-project")
        .arg("--workspace")
        .arg("--message-format")
        .arg("plain")
        .arg("--manifest-path")
        .arg(manifest);

    log::debug!("Running {:?}", cmd);

    let output = cmd.output().map_err(|e| spawn_error(&cargo, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!(
            "Could not resolve workspace for {}, skipping lock file: {}",
            manifest.display(),
            stderr.trim()
        );
        return Ok(None);
    }

    let root_manifest = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    Ok(root_manifest.parent().map(Path::to_path_buf))
}

/// Returns the `Cargo.lock` of the workspace `manifest` belongs to, if any.
///
/// Cargo is only consulted when some `Cargo.lock` exists at or above the
/// manifest's directory.
///
/// # Errors
///
/// Fails if cargo cannot be run at all.
pub fn find_lockfile(manifest: &Path) -> Result<Option<PathBuf>> {
    let Some(nearest) = nearest_lockfile(manifest) else {
        return Ok(None);
    };

    let Some(root) = workspace_root(manifest)? else {
        return Ok(None);
    };

    let lockfile = root.join(LOCKFILE_NAME);
    if lockfile.is_file() {
        log::debug!("Lock file: {}", lockfile.display());
        Ok(Some(lockfile))
    } else {
        log::info!(
            "Ignoring {} outside workspace {}",
            nearest.display(),
            root.display()
        );
        Ok(None)
    }
}

/// Runs `cargo update --workspace` against `manifest`.
pub fn refresh_lockfile(manifest: &Path, offline: bool) -> Result<()> {
    let cargo = cargo_program();

    let mut cmd = Command::new(&cargo);
    cmd.arg("update")
        .arg("--workspace")
        .arg("--manifest-path")
        .arg(manifest);
    if offline {
        cmd.arg("--offline");
    }

    log::debug!("Running {:?}", cmd);

    let output = cmd.output().map_err(|e| spawn_error(&cargo, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("cargo update failed:\n{}", stderr);
        return Err(BumpError::LockRefresh(stderr.trim().to_string()));
    }

    log::info!("Refreshed lock file for {}", manifest.display());
    Ok(())
}
