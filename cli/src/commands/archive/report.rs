//! # Summary Reporter
//!
//! File: cli/src/commands/archive/report.rs
//!
//! ## Overview
//!
//! Terminal output for the `archive` command: the verbose file listing shown
//! before archiving, a per-file progress line in verbose mode, and the summary
//! printed after a successful run. Text is
//! assembled by pure `format_*` functions so it can be tested; the `print_*`
//! wrappers write it to stdout.
//!
use crate::common::fs::discovery::DiscoveredFile;
use std::path::Path;

/// Files listed individually in verbose mode before the "... and N more" line.
pub const LISTING_LIMIT: usize = 10;

const BANNER_WIDTH: usize = 50;

/// Converts bytes to mebibytes (`bytes / 1024 / 1024`).
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Space saved by compression, in percent. Zero when nothing was read.
pub fn compression_ratio(original_size: u64, archive_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (1.0 - archive_size as f64 / original_size as f64) * 100.0
}

/// Everything the final summary reports.
#[derive(Debug)]
pub struct Summary<'a> {
    pub source_dir: &'a Path,
    pub file_count: usize,
    pub original_size: u64,
    pub archive_path: &'a Path,
    pub archive_size: u64,
    pub log_file: &'a Path,
}

pub fn format_file_listing(files: &[DiscoveredFile], limit: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(limit.min(files.len()) + 2);
    lines.push("Log files found:".to_string());
    lines.extend(
        files
            .iter()
            .take(limit)
            .map(|f| format!("  - {}", f.relative_path.display())),
    );
    if files.len() > limit {
        lines.push(format!("  ... and {} more", files.len() - limit));
    }
    lines
}

pub fn print_file_listing(files: &[DiscoveredFile]) {
    for line in format_file_listing(files, LISTING_LIMIT) {
        println!("{line}");
    }
}

/// One verbose progress line, e.g. `Archiving [3/12] app02.log`.
pub fn format_progress(done: usize, total: usize, file: &DiscoveredFile) -> String {
    format!(
        "Archiving [{}/{}] {}",
        done,
        total,
        file.relative_path.display()
    )
}

pub fn format_summary(summary: &Summary<'_>) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    format!(
        "{banner}\n\
         ARCHIVE COMPLETED SUCCESSFULLY\n\
         {banner}\n\
         Original directory: {}\n\
         Files archived: {}\n\
         Original size: {:.2} MB\n\
         Archive size: {:.2} MB\n\
         Compression ratio: {:.1}%\n\
         Archive saved to: {}\n\
         Operation logged to: {}\n\
         {banner}",
        summary.source_dir.display(),
        summary.file_count,
        bytes_to_mb(summary.original_size),
        bytes_to_mb(summary.archive_size),
        compression_ratio(summary.original_size, summary.archive_size),
        summary.archive_path.display(),
        summary.log_file.display(),
    )
}

pub fn print_summary(summary: &Summary<'_>) {
    println!("{}", format_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn discovered(n: usize) -> Vec<DiscoveredFile> {
        (0..n)
            .map(|i| DiscoveredFile {
                relative_path: PathBuf::from(format!("app{i}.log")),
                absolute_path: PathBuf::from(format!("/logs/app{i}.log")),
                size: 1,
            })
            .collect()
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(512 * 1024), 0.5);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(0, 100), 0.0);
        assert_eq!(compression_ratio(1000, 250), 75.0);
        // Tiny inputs can grow once wrapped in tar + gzip.
        assert!(compression_ratio(9, 120) < 0.0);
    }

    #[test]
    fn test_listing_short() {
        let lines = format_file_listing(&discovered(2), LISTING_LIMIT);
        assert_eq!(lines, vec!["Log files found:", "  - app0.log", "  - app1.log"]);
    }

    #[test]
    fn test_listing_truncated() {
        let lines = format_file_listing(&discovered(13), LISTING_LIMIT);
        assert_eq!(lines.len(), 1 + LISTING_LIMIT + 1);
        assert_eq!(lines.last().unwrap(), "  ... and 3 more");
    }

    #[test]
    fn test_progress_line() {
        let files = discovered(12);
        assert_eq!(format_progress(3, 12, &files[2]), "Archiving [3/12] app2.log");
    }

    #[test]
    fn test_summary_contents() {
        let summary = Summary {
            source_dir: Path::new("test_logs"),
            file_count: 2,
            original_size: 2 * 1024 * 1024,
            archive_path: Path::new("archived_logs/logs_archive_20240305_070809.tar.gz"),
            archive_size: 1024 * 1024,
            log_file: Path::new("archive_log.txt"),
        };
        let text = format_summary(&summary);
        assert!(text.contains("ARCHIVE COMPLETED SUCCESSFULLY"));
        assert!(text.contains("Files archived: 2"));
        assert!(text.contains("Original size: 2.00 MB"));
        assert!(text.contains("Archive size: 1.00 MB"));
        assert!(text.contains("Compression ratio: 50.0%"));
        assert!(text.contains("Operation logged to: archive_log.txt"));
    }
}
