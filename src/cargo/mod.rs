//! Cargo manifest manipulation.
//!
//! This module covers the files a version bump touches:
//!
//! - **`locate`**: Resolves which `Cargo.toml` to edit
//! - **`version`**: Rewrites the `version = "..."` declaration line
//! - **`lockfile`**: Refreshes the `Cargo.lock` that records member versions
//!
//! The manifest is edited as text, line by line, so formatting and comments
//! survive untouched.

pub mod locate;
pub mod lockfile;
pub mod version;

pub use locate::locate_manifest;
pub use lockfile::{find_lockfile, refresh_lockfile};
pub use version::{VersionRewrite, rewrite_version_line};
