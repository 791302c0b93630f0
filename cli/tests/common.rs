//! # log-archive Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: launching the compiled binary in
//! an isolated working directory and inspecting the archives it produces.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// # Get log-archive Command (`log_archive_cmd`)
///
/// Builds a `Command` for the compiled `log-archive` binary that runs inside
/// `workdir`. User and project configuration lookups are pointed at `workdir`
/// so settings on the host machine cannot leak into the test.
pub fn log_archive_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("log-archive").expect("Failed to find log-archive binary");
    cmd.current_dir(workdir)
        .env_remove("LOG_ARCHIVE_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env("APPDATA", workdir.join("AppData"));
    cmd
}

/// Lists the archives written to `output_dir`, sorted by name.
pub fn archives_in(output_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(output_dir) else {
        return Vec::new();
    };
    let mut archives: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.to_string_lossy().ends_with(".tar.gz"))
        .collect();
    archives.sort();
    archives
}

/// Entry names stored in a `.tar.gz` archive, with `/` separators.
pub fn archive_entries(archive: &Path) -> BTreeSet<String> {
    let file = File::open(archive).expect("Failed to open archive");
    let mut tar_archive = tar::Archive::new(GzDecoder::new(file));
    tar_archive
        .entries()
        .expect("Failed to read archive entries")
        .map(|entry| {
            entry
                .expect("Corrupt archive entry")
                .path()
                .expect("Entry without path")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// True for `logs_archive_<8 digits>_<6 digits>.tar.gz`.
pub fn is_archive_name(name: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix("logs_archive_")
        .and_then(|rest| rest.strip_suffix(".tar.gz"))
    else {
        return false;
    };
    match stamp.split_once('_') {
        Some((date, time)) => {
            date.len() == 8
                && time.len() == 6
                && date.chars().chain(time.chars()).all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Builds a set of owned names for comparisons against `archive_entries`.
pub fn name_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}
