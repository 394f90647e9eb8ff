//! Orchestration logic for version bumps.
//!
//! The manifest is only written through a `FileEdit`, after every pre-flight
//! check has passed.

use crate::cargo::{find_lockfile, locate_manifest, refresh_lockfile, rewrite_version_line};
use crate::error::{BumpError, Result};
use crate::fs::FileEdit;
use crate::verify::{
    preflight_checks, validate_version, verify_content, verify_written, warn_on_downgrade,
};

use clap::Parser;
use colored::Colorize;
use std::path::Path;

/// Arguments for the `bump` subcommand.
#[derive(Parser, Debug, Clone)]
#[command(verbatim_doc_comment)]
pub struct BumpArgs {
    /// Version to write, optionally preceded by the current version
    ///
    /// With a single value, it is the version to write. With two values, the
    /// first is the expected current version (informational only) and the
    /// second is the version to write.
    ///
    /// Examples:
    ///   cargo bump 1.3.0
    ///   cargo bump 1.2.3 1.3.0
    #[arg(value_name = "VERSION", num_args = 1..=2, required = true, verbatim_doc_comment)]
    pub versions: Vec<String>,

    #[command(flatten)]
    pub manifest: clap_cargo::Manifest,

    /// Show the change without writing it
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Do not regenerate Cargo.lock after editing the manifest
    #[arg(long)]
    pub no_lock_update: bool,

    /// Regenerate Cargo.lock without network access
    #[arg(long)]
    pub offline: bool,
}

impl BumpArgs {
    /// Version to write.
    pub fn new_version(&self) -> &str {
        self.versions.last().map(String::as_str).unwrap_or_default()
    }

    /// Expected current version, when two versions were given.
    pub fn old_version(&self) -> Option<&str> {
        match self.versions.as_slice() {
            [old, _] => Some(old.as_str()),
            _ => None,
        }
    }

    /// Validates the arguments are coherent.
    pub fn validate(&self) -> Result<()> {
        if self.versions.is_empty() || self.versions.len() > 2 {
            return Err(BumpError::Other(anyhow::anyhow!(
                "Expected NEW_VERSION or OLD_VERSION NEW_VERSION, got {} value(s)",
                self.versions.len()
            )));
        }

        validate_version(self.new_version())
    }

    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest.manifest_path.as_deref()
    }

    fn should_refresh_lock(&self) -> bool {
        !self.dry_run && !self.no_lock_update
    }
}

/// Executes a version bump.
///
/// ## Phases
///
/// 1. Validate arguments
/// 2. Locate and read the manifest
/// 3. Compute the rewrite
/// 4. Pre-flight checks on the staged content
/// 5. Resolve the workspace `Cargo.lock`
/// 6. Write the manifest in place (skipped in dry-run)
/// 7. Verify the declaration line
/// 8. Regenerate `Cargo.lock` if the workspace has one
///
/// Returns the first error encountered. Nothing is rolled back.
pub fn execute(args: BumpArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    execute_in(&args, &cwd)
}

/// Like [`execute`], resolving relative paths against `cwd`.
pub fn execute_in(args: &BumpArgs, cwd: &Path) -> Result<()> {
    args.validate()?;

    let new_version = args.new_version();
    let manifest = locate_manifest(args.manifest_path(), cwd)?;
    log::debug!("Manifest: {}", manifest.display());

    let content = std::fs::read_to_string(&manifest).map_err(|e| {
        BumpError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", manifest.display(), e),
        ))
    })?;

    let rewrite = rewrite_version_line(&content, new_version)?;
    preflight_checks(
        &manifest,
        &rewrite,
        new_version,
        args.old_version(),
        args.dry_run,
    )?;

    if let Some(previous) = rewrite.previous.as_deref() {
        warn_on_downgrade(previous, new_version);
    }

    match rewrite.line_number {
        Some(line) => log::info!(
            "Rewriting line {} of {}: {}",
            line,
            manifest.display(),
            rewrite.original_line.as_deref().unwrap_or_default()
        ),
        None => log::warn!(
            "No line starting with 'version =' in {}",
            manifest.display()
        ),
    }

    let lockfile = if args.should_refresh_lock() {
        find_lockfile(&manifest)?
    } else {
        None
    };

    let mut edit = FileEdit::stage(manifest.clone(), rewrite.content, args.dry_run)?;
    edit.commit()?;

    if args.dry_run {
        verify_content(edit.content(), new_version)?;
    } else {
        verify_written(&manifest, new_version)?;
    }

    edit.print_summary(cwd);

    match lockfile {
        Some(lockfile) => {
            println!("{:>12} {}", "Updating".cyan().bold(), lockfile.display());
            refresh_lockfile(&manifest, args.offline)?;
        }
        None => log::debug!("No Cargo.lock to refresh for {}", manifest.display()),
    }

    print_success(&manifest, rewrite.previous.as_deref(), new_version, args.dry_run);
    Ok(())
}

fn print_success(manifest: &Path, previous: Option<&str>, new_version: &str, dry_run: bool) {
    let name = package_name(manifest).unwrap_or_else(|| manifest.display().to_string());
    let previous = previous.unwrap_or("?");

    if dry_run {
        println!(
            "{:>12} {} {} -> {} (dry run)",
            "Would bump".blue().bold(),
            name,
            previous.yellow(),
            new_version.green()
        );
    } else {
        println!(
            "{:>12} {} {} -> {}",
            "Bumped".green().bold(),
            name,
            previous.yellow(),
            new_version.green().bold()
        );
    }
}

fn package_name(manifest: &Path) -> Option<String> {
    let content = std::fs::read_to_string(manifest).ok()?;
    let doc: toml_edit::DocumentMut = content.parse().ok()?;
    doc.get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
