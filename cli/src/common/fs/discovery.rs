//! # log-archive Log File Discovery (`common::fs::discovery`)
//!
//! File: cli/src/common/fs/discovery.rs
//!
//! ## Overview
//!
//! Finds the files that go into an archive. Discovery has two steps:
//!
//! 1. `validate_source_dir` checks that the source directory exists, is a
//!    directory and can be listed, mapping failures onto
//!    `ArchiveError::{DirectoryNotFound, NotADirectory, PermissionDenied}`.
//! 2. `discover_log_files` walks the directory recursively with `walkdir` and
//!    lazily yields a `DiscoveredFile` for every regular file whose name
//!    passes the `LogFilter`. A symlink to a regular file counts as that
//!    file; symlinked directories are not descended into.
//!
//! ## Selection Rules
//!
//! Without include patterns a file is a log file when its name ends in
//! `.log` or contains `log` in any letter case. This admits names such as
//! `catalog.txt`; the rule is intentionally left permissive.
//!
//! - Exclude patterns are checked first and always win.
//! - Include patterns, when present, replace the default rule.
//! - Patterns are `glob` patterns matched against the file name only.
//!
//! Paths passed as `skip` (the output directory and the operation log) are
//! pruned from the walk so a run never archives its own output.
//!
//! Nothing is locked: files may change between discovery and archiving.
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::Context;
use glob::Pattern;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path relative to the source directory; used as the archive entry name.
    pub relative_path: PathBuf,
    /// Absolute path the content is read from.
    pub absolute_path: PathBuf,
    /// Size in bytes at discovery time.
    pub size: u64,
}

/// Name-based predicate deciding which files are archived.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl LogFilter {
    /// Compiles include and exclude glob patterns.
    ///
    /// Fails with `ArchiveError::InvalidPattern` on the first pattern that
    /// does not parse.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// Returns true when a file called `file_name` should be archived.
    pub fn matches(&self, file_name: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(file_name)) {
            return false;
        }
        if !self.include.is_empty() {
            return self.include.iter().any(|p| p.matches(file_name));
        }
        is_log_file_name(file_name)
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|raw| {
            let raw = raw.as_ref();
            Pattern::new(raw).map_err(|e| {
                anyhow::Error::new(ArchiveError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: e.msg.to_string(),
                })
            })
        })
        .collect()
}

/// Splits a comma-separated pattern list such as `"*.log, *.txt"`.
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Default discovery predicate: `.log` suffix or a case-insensitive `log` substring.
pub fn is_log_file_name(file_name: &str) -> bool {
    file_name.ends_with(".log") || file_name.to_lowercase().contains("log")
}

/// Checks that `path` is an existing, listable directory.
pub fn validate_source_dir(path: &Path) -> Result<PathBuf> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => return Err(map_access_error(path, e)),
    };
    if !metadata.is_dir() {
        anyhow::bail!(ArchiveError::NotADirectory {
            path: path.to_path_buf()
        });
    }
    if let Err(e) = fs::read_dir(path) {
        return Err(map_access_error(path, e));
    }
    debug!("Source directory validated: {}", path.display());
    Ok(path.to_path_buf())
}

fn map_access_error(path: &Path, err: std::io::Error) -> anyhow::Error {
    match err.kind() {
        ErrorKind::NotFound => ArchiveError::DirectoryNotFound {
            path: path.to_path_buf(),
        }
        .into(),
        ErrorKind::PermissionDenied => ArchiveError::PermissionDenied {
            path: path.to_path_buf(),
        }
        .into(),
        _ => anyhow::Error::new(err)
            .context(format!("Failed to access directory '{}'", path.display())),
    }
}

/// Lazily walks `root` and yields every file accepted by `filter`.
///
/// `root` must already be validated. Entries under any of the `skip` paths
/// that exist are pruned. Entries that cannot be read during the walk are
/// logged and skipped.
pub fn discover_log_files<'a>(
    root: &Path,
    filter: &'a LogFilter,
    skip: &[&Path],
) -> Result<impl Iterator<Item = DiscoveredFile> + 'a> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory '{}'", root.display()))?;
    let skip: Vec<PathBuf> = skip
        .iter()
        .filter_map(|p| p.canonicalize().ok())
        .filter(|p| p != &root)
        .collect();
    debug!("Walking {} (pruning {:?})", root.display(), skip);

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| {
            let pruned = skip.iter().any(|s| entry.path() == s);
            if pruned {
                debug!("Pruning {}", entry.path().display());
            }
            !pruned
        });

    let files = walker
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry during discovery: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || entry.path_is_symlink())
        .filter(move |entry| filter.matches(&entry.file_name().to_string_lossy()))
        .filter_map(move |entry| {
            let size = regular_file_size(&entry)?;
            let relative_path = entry.path().strip_prefix(&root).ok()?.to_path_buf();
            Some(DiscoveredFile {
                relative_path,
                absolute_path: entry.into_path(),
                size,
            })
        });

    Ok(files)
}

/// Size of the regular file behind `entry`, following a symlink to its target.
/// `None` for anything else, including dangling links and links to directories.
fn regular_file_size(entry: &walkdir::DirEntry) -> Option<u64> {
    let metadata = if entry.path_is_symlink() {
        fs::metadata(entry.path()).map_err(|e| e.to_string())
    } else {
        entry.metadata().map_err(|e| e.to_string())
    };
    match metadata {
        Ok(m) if m.is_file() => Some(m.len()),
        Ok(_) => {
            debug!("Skipping {}: not a regular file", entry.path().display());
            None
        }
        Err(e) => {
            warn!("Skipping {}: {}", entry.path().display(), e);
            None
        }
    }
}

/// Sum of the sizes recorded at discovery time.
pub fn total_size(files: &[DiscoveredFile]) -> u64 {
    files.iter().map(|f| f.size).sum()
}
