//! Pre-flight checks performed before the manifest is modified.
//!
//! Unlike `rules`, these functions look at the file on disk, its current
//! content, and the staged rewrite. Nothing is written until all of them pass.

use crate::cargo::VersionRewrite;
use crate::error::{BumpError, Result};
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, Item};

/// Keys that hold the crate's own version, in lookup order.
const VERSION_KEYS: &[&[&str]] = &[&["package", "version"], &["workspace", "package", "version"]];

/// Checks that the manifest can be rewritten in place.
pub fn check_writable(manifest: &Path) -> Result<()> {
    let metadata = fs::metadata(manifest)?;

    if !metadata.is_file() {
        return Err(BumpError::InvalidManifestPath(
            manifest.to_path_buf(),
            "is not a regular file".to_string(),
        ));
    }

    if metadata.permissions().readonly() {
        return Err(BumpError::ReadOnly(manifest.to_path_buf()));
    }

    Ok(())
}

/// Fails if the manifest already declares `new_version`.
///
/// Compares against the value of the declaration line, not a raw substring
/// of the file, so `serde = "1.0"` does not block a bump to `1.0`.
pub fn check_not_current(declared: Option<&str>, new_version: &str) -> Result<()> {
    if declared == Some(new_version) {
        return Err(BumpError::AlreadyAtVersion(new_version.to_string()));
    }
    Ok(())
}

/// Checks that the staged content declares `new_version` as the crate version.
///
/// Catches a rewrite that landed on some other table's `version` line while
/// `package.version` (or `workspace.package.version`) still holds a different
/// plain string. Content that does not parse as TOML, and versions that are
/// not plain strings (`{ workspace = true }`), are skipped with a log line.
pub fn check_package_version(staged: &str, new_version: &str) -> Result<()> {
    let doc: DocumentMut = match staged.parse() {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Manifest is not valid TOML, skipping package.version check: {}", e);
            return Ok(());
        }
    };

    if let Some((key, item)) = crate_version_item(&doc) {
        match item.as_str() {
            Some(declared) if declared != new_version => {
                return Err(BumpError::VerificationFailed(format!(
                    "rewritten line is not the crate version: {} is \"{}\", expected \"{}\"",
                    key, declared, new_version
                )));
            }
            Some(_) => log::debug!("{} matches", key),
            None => log::debug!("{} is not a plain string, skipping", key),
        }
    }

    Ok(())
}

fn crate_version_item(doc: &DocumentMut) -> Option<(String, &Item)> {
    VERSION_KEYS.iter().find_map(|path| {
        let mut item = doc.as_item();
        for key in path.iter() {
            item = item.get(key)?;
        }
        Some((path.join("."), item))
    })
}

/// Performs all checks that must pass before the manifest is touched.
///
/// # Checks Performed
///
/// 1. Manifest is a writable regular file (skipped in dry-run)
/// 2. Manifest does not already declare `new_version`
/// 3. The staged rewrite sets the crate version, when one is declared
/// 4. The informational `old_version`, if given, matches the declaration
///    (mismatch is only logged)
///
/// # Errors
///
/// Returns the first failing check. No filesystem modifications are made.
pub fn preflight_checks(
    manifest: &Path,
    rewrite: &VersionRewrite,
    new_version: &str,
    old_version: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    if !dry_run {
        check_writable(manifest)?;
    }
    check_not_current(rewrite.previous.as_deref(), new_version)?;

    if rewrite.matched() {
        check_package_version(&rewrite.content, new_version)?;
    }

    if let Some(expected) = old_version {
        match rewrite.previous.as_deref() {
            Some(declared) if declared != expected => {
                log::warn!(
                    "Expected current version '{}' but manifest declares '{}'",
                    expected,
                    declared
                );
            }
            None => {
                log::warn!(
                    "Expected current version '{}' but manifest has no quoted version",
                    expected
                );
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cargo::rewrite_version_line;
    use tempfile::TempDir;

    #[test]
    fn test_check_not_current() {
        assert!(check_not_current(Some("1.0.0"), "1.1.0").is_ok());
        assert!(check_not_current(None, "1.1.0").is_ok());
        assert!(matches!(
            check_not_current(Some("1.1.0"), "1.1.0"),
            Err(BumpError::AlreadyAtVersion(v)) if v == "1.1.0"
        ));
    }

    #[test]
    fn test_substring_elsewhere_does_not_block() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("Cargo.toml");
        let content = "[package]\nversion = \"0.9.0\"\n\n[dependencies]\nserde = \"1.0\"\n";
        fs::write(&manifest, content).unwrap();

        let rewrite = rewrite_version_line(content, "1.0").unwrap();
        assert!(preflight_checks(&manifest, &rewrite, "1.0", None, false).is_ok());
    }

    #[test]
    fn test_old_version_mismatch_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("Cargo.toml");
        let content = "version = \"0.1.0\"\n";
        fs::write(&manifest, content).unwrap();

        let rewrite = rewrite_version_line(content, "0.2.0").unwrap();
        assert!(preflight_checks(&manifest, &rewrite, "0.2.0", Some("0.0.9"), false).is_ok());
    }

    #[test]
    fn test_directory_is_not_writable_manifest() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            check_writable(temp.path()),
            Err(BumpError::InvalidManifestPath(_, _))
        ));
    }

    #[test]
    fn test_missing_manifest_is_io_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            check_writable(&temp.path().join("Cargo.toml")),
            Err(BumpError::Io(_))
        ));
    }

    #[test]
    fn test_read_only_allowed_in_dry_run() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("Cargo.toml");
        let content = "version = \"0.1.0\"\n";
        fs::write(&manifest, content).unwrap();

        let mut perms = fs::metadata(&manifest).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&manifest, perms).unwrap();

        let rewrite = rewrite_version_line(content, "0.2.0").unwrap();
        assert!(preflight_checks(&manifest, &rewrite, "0.2.0", None, true).is_ok());
        assert!(matches!(
            preflight_checks(&manifest, &rewrite, "0.2.0", None, false),
            Err(BumpError::ReadOnly(_))
        ));

        let mut perms = fs::metadata(&manifest).unwrap().permissions();
        perms.set_readonly(false);
        fs::set_permissions(&manifest, perms).unwrap();
    }

    #[test]
    fn test_package_version_matches() {
        let staged = "[package]\nname = \"x\"\nversion = \"1.3.0\"\n";
        assert!(check_package_version(staged, "1.3.0").is_ok());
    }

    #[test]
    fn test_dependency_line_is_not_the_crate_version() {
        let staged = "[dependencies.foo]\nversion = \"2.0.0\"\n\n[package]\nname = \"x\"\nversion = \"0.1.0\"\n";
        let err = check_package_version(staged, "2.0.0").unwrap_err();
        assert!(matches!(err, BumpError::VerificationFailed(_)));
        assert!(err.to_string().contains("package.version"));
    }

    #[test]
    fn test_inherited_version_is_skipped() {
        let staged = "[workspace.package]\nversion = \"0.4.0\"\n\n[package]\nname = \"x\"\nversion = { workspace = true }\n";
        assert!(check_package_version(staged, "0.4.0").is_ok());
    }

    #[test]
    fn test_workspace_package_version() {
        let staged = "[workspace]\nmembers = [\"a\"]\n\n[workspace.package]\nversion = \"0.4.0\"\n";
        assert!(check_package_version(staged, "0.4.0").is_ok());
        assert!(check_package_version(staged, "0.5.0").is_err());
    }

    #[test]
    fn test_non_toml_content_is_opaque() {
        let staged = "name: x\nversion = \"1.3.0\"\n";
        assert!(check_package_version(staged, "1.3.0").is_ok());
    }

    #[test]
    fn test_non_toml_manifest_passes_preflight() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("Cargo.toml");
        let content = "name: x\nversion = \"1.2.3\"\n";
        fs::write(&manifest, content).unwrap();

        let rewrite = rewrite_version_line(content, "1.3.0").unwrap();
        assert!(preflight_checks(&manifest, &rewrite, "1.3.0", None, false).is_ok());
    }
}
