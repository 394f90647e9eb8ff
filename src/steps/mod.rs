//! Subcommand implementations.

pub mod bump;
