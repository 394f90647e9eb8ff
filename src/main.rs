//! Binary entry point for `cargo-bump`.

use colored::Colorize;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = cargo_bump::run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}
