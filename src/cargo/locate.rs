//! Manifest file resolution.

use crate::error::{BumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_NAME: &str = "Cargo.toml";

/// Resolves the manifest to edit.
///
/// ## Behavior
/// - `explicit` set: resolved against `cwd` if relative; must exist and be a file
/// - Otherwise `cwd/Cargo.toml`
/// - Otherwise the first file in `cwd` whose name matches `cargo.toml`
///   case-insensitively (sorted by name)
pub fn locate_manifest(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };

        if !path.exists() {
            return Err(BumpError::ManifestNotFound(path));
        }

        if path.is_dir() {
            return Err(BumpError::InvalidManifestPath(
                path,
                "is a directory".to_string(),
            ));
        }

        log::debug!("Using explicit manifest: {}", path.display());
        return Ok(path);
    }

    let default = cwd.join(MANIFEST_NAME);
    if default.is_file() {
        log::debug!("Using manifest: {}", default.display());
        return Ok(default);
    }

    match find_case_insensitive(cwd)? {
        Some(found) => {
            log::info!(
                "Using '{}' (case-insensitive match for {})",
                found.display(),
                MANIFEST_NAME
            );
            Ok(found)
        }
        None => Err(BumpError::ManifestNotFound(default)),
    }
}

fn find_case_insensitive(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(MANIFEST_NAME))
        })
        .map(|entry| entry.path())
        .collect();

    candidates.sort();
    Ok(candidates.into_iter().next())
}
