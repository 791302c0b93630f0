//! # log-archive Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the archive builder and the
//! operation recorder:
//! - **`ensure_dir_exists`**: Creates a directory (and parents) when missing, and rejects paths that exist as something other than a directory.
//! - **`append_string_to_file`**: Appends text to a file, creating the file and its parent directory on first use. Existing content is never rewritten.
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! io::ensure_dir_exists(Path::new("./archived_logs"))?;
//! io::append_string_to_file(Path::new("archive_log.txt"), "Timestamp: ...\n")?;
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Missing directories are created recursively (like `mkdir -p`). A path
/// that exists but is not a directory is an error.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!("Path exists but is not a directory: {:?}", path);
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Appends `content` to the file at `path`.
///
/// The file is opened in append mode, so prior content is preserved
/// byte for byte. The parent directory is created if needed.
pub fn append_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to append to file {:?}", path))?;
    file.flush()
        .with_context(|| format!("Failed to flush file {:?}", path))?;
    debug!("Appended {} bytes to {:?}", content.len(), path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Test `ensure_dir_exists` when the directory needs to be created, including parents.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the directory already exists.
    #[test]
    fn test_ensure_dir_exists_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        let existing_dir = base_dir.path().join("existing");
        fs::create_dir(&existing_dir)?;
        ensure_dir_exists(&existing_dir)?;
        assert!(existing_dir.is_dir());
        Ok(())
    }

    /// Test `ensure_dir_exists` when the target path exists but is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_append_creates_file_and_parent() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("records/archive_log.txt");
        append_string_to_file(&file_path, "first\n")?;
        assert_eq!(fs::read_to_string(&file_path)?, "first\n");
        Ok(())
    }

    #[test]
    fn test_append_preserves_existing_content() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("archive_log.txt");
        fs::write(&file_path, "old entry without newline")?;
        append_string_to_file(&file_path, "\nnew entry\n")?;
        assert_eq!(
            fs::read_to_string(&file_path)?,
            "old entry without newline\nnew entry\n"
        );
        Ok(())
    }
}
