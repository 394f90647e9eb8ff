//! Error types for cargo-bump.
//!
//! All operations return `Result<T>` which aliases `Result<T, BumpError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from bump operations.
#[derive(Debug, Error)]
pub enum BumpError {
    /// No manifest at the resolved location.
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Manifest path exists but cannot be used (e.g. a directory).
    #[error("Invalid manifest path '{0}': {1}")]
    InvalidManifestPath(PathBuf, String),

    /// Target version would corrupt the declaration line.
    #[error("Invalid version '{0}': {1}")]
    InvalidVersion(String, String),

    /// Manifest already declares the target version.
    #[error("Manifest already declares version '{0}'")]
    AlreadyAtVersion(String),

    /// Manifest cannot be written.
    #[error("Manifest is read-only: {0}")]
    ReadOnly(PathBuf),

    /// Rewritten manifest does not declare the target version.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Lock file regeneration failed.
    #[error("Lock file update failed: {0}")]
    LockRefresh(String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for cargo-bump operations.
pub type Result<T> = std::result::Result<T, BumpError>;
