use clap::{Parser, Subcommand};

use crate::steps::bump::BumpArgs;

#[derive(Parser)]
#[command(name = "cargo-bump", bin_name = "cargo", version)]
pub struct CargoCli {
    #[command(subcommand)]
    pub command: CargoCommand,
}

#[derive(Subcommand)]
pub enum CargoCommand {
    /// Rewrite the version declared in a Cargo manifest.
    Bump(BumpArgs),
}
