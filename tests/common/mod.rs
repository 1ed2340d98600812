// tests/common/mod.rs — Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Resolve the compiled binary from the workspace target directory
pub fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_get-lines"))
}

/// Execute the get-lines binary with given arguments and no global config.
pub fn run_bin(args: &[&str]) -> std::process::Output {
    let home = TempDir::new().expect("TempDir::new");
    run_bin_in(home.path(), args)
}

/// Execute the get-lines binary with `config` as its global `config.toml`.
pub fn run_bin_with_config(config: &str, args: &[&str]) -> std::process::Output {
    let home = TempDir::new().expect("TempDir::new");
    // Linux reads $XDG_CONFIG_HOME, macOS reads $HOME/Library/Application Support.
    for dir in [
        home.path().join(".config"),
        home.path().join("Library/Application Support"),
    ] {
        let dir = dir.join("get-lines");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), config).unwrap();
    }
    run_bin_in(home.path(), args)
}

/// Run with `home` standing in for the user's home and config directories.
fn run_bin_in(home: &Path, args: &[&str]) -> std::process::Output {
    std::process::Command::new(bin_path())
        .args(args)
        .env("NO_COLOR", "1")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .expect("Failed to execute get-lines binary")
}

/// Create a temporary directory with a set of named files and content.
pub fn make_fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("TempDir::new");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
    dir
}

/// Report rows printed by the table: lines framed by `│` that are not the header.
pub fn table_rows(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|l| l.starts_with('│') && !l.contains("File Path"))
        .map(|l| l.to_string())
        .collect()
}
