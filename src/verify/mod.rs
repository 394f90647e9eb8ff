//! Validation and verification for bump operations.

pub mod postcheck;
pub mod preflight;
pub mod rules;

pub use postcheck::{verify_content, verify_written};
pub use preflight::{check_not_current, check_package_version, check_writable, preflight_checks};
pub use rules::{validate_version, warn_on_downgrade};
