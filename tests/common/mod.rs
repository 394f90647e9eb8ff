//! Shared fixtures for cargo-bump integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Manifest used by most tests, declaring `version`.
#[allow(unused)]
pub fn package_manifest(version: &str) -> String {
    format!(
        r#"[package]
name = "demo"
version = "{version}"
edition = "2021"

[dependencies]
"#
    )
}

/// Creates a single-package directory with `Cargo.toml` and `src/lib.rs`.
#[allow(unused)]
pub fn create_test_package(version: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), &package_manifest(version));

    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/lib.rs"), "pub fn demo() {}\n").unwrap();

    temp
}

#[allow(unused)]
pub fn write_manifest(dir: &Path, content: &str) {
    fs::write(dir.join("Cargo.toml"), content).unwrap();
}

#[allow(unused)]
pub fn read_manifest(dir: &Path) -> String {
    fs::read_to_string(dir.join("Cargo.toml")).unwrap()
}

/// Runs `cargo bump <versions..> <extra_args..>` in `dir`.
pub fn run_bump(dir: &Path, versions: &[&str], extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("cargo-bump");
    cmd.arg("bump")
        .args(versions)
        .args(extra_args)
        .env_remove("RUST_LOG")
        .current_dir(dir);

    cmd.assert()
}
