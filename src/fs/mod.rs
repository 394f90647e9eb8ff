//! File system operations.
//!
//! Provides a staged single-file edit that can be previewed before it is
//! written in place.

pub mod edit;

pub use edit::FileEdit;
