//! # Operation Recorder
//!
//! File: cli/src/commands/archive/record.rs
//!
//! ## Overview
//!
//! Appends one record block per successful run to the operation log:
//!
//! ```text
//! Timestamp: 2024-03-05 07:08:09
//! Original Directory: /var/log/myapp
//! Archive: archived_logs/logs_archive_20240305_070809.tar.gz
//! Archive Size: 0.01 MB
//! ==================================================
//! ```
//!
//! The file is created on first use and only ever appended to. A failure to
//! write is reported as `ArchiveError::LogWrite`; the archive that was
//! already produced is left in place.
//!
use crate::commands::archive::report::bytes_to_mb;
use crate::common::fs::io::append_string_to_file;
use crate::core::error::{ArchiveError, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

/// Separator closing every record block.
pub const RECORD_SEPARATOR_WIDTH: usize = 50;

/// Metadata about one archiving run.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRecord {
    pub timestamp: DateTime<Local>,
    pub source_dir: PathBuf,
    pub archive_path: PathBuf,
    pub archive_size: u64,
}

impl ArchiveRecord {
    /// Renders the record block, including the trailing newline.
    pub fn to_block(&self) -> String {
        format!(
            "Timestamp: {}\nOriginal Directory: {}\nArchive: {}\nArchive Size: {:.2} MB\n{}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.source_dir.display(),
            self.archive_path.display(),
            bytes_to_mb(self.archive_size),
            "=".repeat(RECORD_SEPARATOR_WIDTH)
        )
    }
}

/// Appends `record` to the operation log at `log_file`.
pub fn append_record(log_file: &Path, record: &ArchiveRecord) -> Result<()> {
    append_string_to_file(log_file, &record.to_block()).map_err(|e| {
        anyhow::Error::new(ArchiveError::LogWrite {
            path: log_file.to_path_buf(),
            reason: format!("{e:#}"),
        })
    })?;
    info!("Operation logged to {}", log_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn sample(size: u64) -> ArchiveRecord {
        ArchiveRecord {
            timestamp: Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap(),
            source_dir: PathBuf::from("/var/log/myapp"),
            archive_path: PathBuf::from("archived_logs/logs_archive_20240305_070809.tar.gz"),
            archive_size: size,
        }
    }

    #[test]
    fn test_block_format() {
        let block = sample(3 * 1024 * 1024 / 2).to_block();
        let expected = format!(
            "Timestamp: 2024-03-05 07:08:09\n\
             Original Directory: /var/log/myapp\n\
             Archive: archived_logs/logs_archive_20240305_070809.tar.gz\n\
             Archive Size: 1.50 MB\n\
             {}\n",
            "=".repeat(50)
        );
        assert_eq!(block, expected);
    }

    #[test]
    fn test_small_archive_rounds_to_two_decimals() {
        let block = sample(180).to_block();
        assert!(block.contains("Archive Size: 0.00 MB\n"));
    }

    #[test]
    fn test_append_adds_one_block_per_call() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("archive_log.txt");
        fs::write(&log_file, "unrelated prior content\n").unwrap();

        append_record(&log_file, &sample(1024)).unwrap();
        append_record(&log_file, &sample(2048)).unwrap();

        let content = fs::read_to_string(&log_file).unwrap();
        assert!(content.starts_with("unrelated prior content\n"));
        assert_eq!(content.matches("Timestamp: ").count(), 2);
        assert_eq!(content.matches(&"=".repeat(50)).count(), 2);
    }

    #[test]
    fn test_append_failure_is_log_write_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending.
        let err = append_record(dir.path(), &sample(1)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::LogWrite { .. })
        ));
    }
}
