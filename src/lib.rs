#![doc = include_str!("../README.md")]

pub mod cargo;
pub mod cli;
pub mod error;
pub mod fs;
pub mod steps;
pub mod verify;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use cli::CargoCommand;

    let cli = cli::CargoCli::parse();
    match cli.command {
        CargoCommand::Bump(args) => steps::bump::execute(args),
    }
}
