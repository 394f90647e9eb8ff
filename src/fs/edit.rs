//! Staged in-place edit of a single file.
//!
//! ## Phases
//!
//! 1. **Stage**: Read the current content and record the replacement
//! 2. **Validate**: File still exists and is writable
//! 3. **Commit**: Write the new content in place (or only report it in dry-run)
//!
//! There is no rollback. A failure after commit leaves the file as written.
//!
//! ## Example
//!
//! ```no_run
//! # use cargo_bump::fs::FileEdit;
//! # use std::path::PathBuf;
//! # fn example() -> cargo_bump::error::Result<()> {
//! let mut edit = FileEdit::stage(
//!     PathBuf::from("Cargo.toml"),
//!     "[package]\nversion = \"0.2.0\"\n".into(),
//!     false,
//! )?;
//! edit.commit()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{BumpError, Result};

use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditState {
    /// Staged, not yet written.
    Staged,
    /// Written (or reported, in dry-run).
    Committed,
    /// Validation or write failed.
    Failed,
}

/// A pending replacement of one file's content.
#[must_use = "FileEdit must be committed"]
pub struct FileEdit {
    path: PathBuf,
    original: String,
    new: String,
    dry_run: bool,
    state: EditState,
}

impl FileEdit {
    /// Stages `new_content` for `path`.
    ///
    /// Fails if the current content cannot be read.
    pub fn stage(path: PathBuf, new_content: String, dry_run: bool) -> Result<Self> {
        log::debug!("Staging update for: {}", path.display());

        let original = fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            BumpError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        if original == new_content {
            log::debug!("Content unchanged, skipping: {}", path.display());
        } else if dry_run {
            log::info!("Would update: {}", path.display());
        }

        Ok(Self {
            path,
            original,
            new: new_content,
            dry_run,
            state: EditState::Staged,
        })
    }

    /// Returns `true` if committing would not change the file.
    pub fn is_noop(&self) -> bool {
        self.original == self.new
    }

    /// Staged content.
    pub fn content(&self) -> &str {
        &self.new
    }

    /// Lines that differ, as `(line_no, before, after)` with 1-based numbers.
    pub fn changed_lines(&self) -> Vec<(usize, &str, &str)> {
        self.original
            .lines()
            .zip(self.new.lines())
            .enumerate()
            .filter(|(_, (before, after))| before != after)
            .map(|(idx, (before, after))| (idx + 1, before, after))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(BumpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File no longer exists: {}", self.path.display()),
            )));
        }

        let metadata = fs::metadata(&self.path)?;
        if metadata.permissions().readonly() {
            return Err(BumpError::ReadOnly(self.path.clone()));
        }

        Ok(())
    }

    /// Writes the staged content in place.
    ///
    /// A no-op edit and a dry-run edit write nothing.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != EditState::Staged {
            return Err(BumpError::Other(anyhow::anyhow!(
                "Edit already committed: {}",
                self.path.display()
            )));
        }

        if self.dry_run || self.is_noop() {
            self.state = EditState::Committed;
            return Ok(());
        }

        if let Err(e) = self.validate() {
            self.state = EditState::Failed;
            return Err(e);
        }

        if let Err(e) = fs::write(&self.path, &self.new) {
            self.state = EditState::Failed;
            return Err(BumpError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {}", self.path.display(), e),
            )));
        }

        log::debug!("Updated: {}", self.path.display());
        self.state = EditState::Committed;
        Ok(())
    }

    /// Prints the edit to stdout, with the path relative to `cwd`.
    pub fn print_summary(&self, cwd: &Path) {
        let relative = pathdiff::diff_paths(&self.path, cwd).unwrap_or_else(|| self.path.clone());
        let display = relative.to_string_lossy().replace('\\', "/");

        if self.is_noop() {
            println!("{:>12} {}", "Unchanged".yellow().bold(), display);
            return;
        }

        let verb = if self.dry_run { "Pending" } else { "Updated" };
        println!("{:>12} {}", verb.blue().bold(), display);

        for (line_no, before, after) in self.changed_lines() {
            println!("{:>12} {}", format!("{}:", line_no).dimmed(), before.red());
            println!("{:>12} {}", "", after.green());
        }
    }
}

impl Drop for FileEdit {
    fn drop(&mut self) {
        if self.state == EditState::Staged && !self.is_noop() && !self.dry_run {
            log::warn!("Edit to {} dropped without commit", self.path.display());
        }
    }
}
