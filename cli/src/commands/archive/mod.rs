//! # log-archive Archive Command
//!
//! File: cli/src/commands/archive/mod.rs
//!
//! ## Overview
//!
//! This module implements the tool's single command: find the log files in a
//! directory, pack them into `logs_archive_<YYYYMMDD_HHMMSS>.tar.gz`, append a
//! record to the operation log and print a summary.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. Load configuration and merge the command-line flags over it into an
//!    immutable `ArchiveRequest`.
//! 2. **Validate** the source directory (`common::fs::discovery::validate_source_dir`).
//! 3. **Discover** matching files (`common::fs::discovery::discover_log_files`).
//!    An empty result stops the run with `ArchiveError::NoFilesFound`.
//! 4. **Archive** them (`common::archive::tar::write_log_archive`).
//! 5. **Record** the run in the operation log (`record::append_record`).
//! 6. Print the summary (`report::print_summary`).
//!
//! Each stage is terminal on failure. There are no retries, and nothing is
//! rolled back except the partial archive file.
//!
//! ## Examples
//!
//! ```bash
//! # Archive log files from the current directory
//! log-archive
//!
//! # Archive a specific directory with verbose diagnostics
//! log-archive -v /var/log/myapp
//!
//! # Only *.log files, skipping debug output, into a custom location
//! log-archive /var/log/myapp -i '*.log' -e 'debug*' -o /srv/archives
//!
//! # Archive the Windows Event Log directory
//! log-archive --windows-logs
//! ```
//!
pub mod record;
pub mod report;

use crate::common::archive::tar::{write_log_archive, ArchiveOutcome};
use crate::common::fs::discovery::{
    discover_log_files, split_patterns, total_size, validate_source_dir, LogFilter,
};
use crate::common::system;
use crate::core::config::{self, Config};
use crate::core::error::{ArchiveError, Result};
use chrono::Local;
use clap::Args;
use record::{append_record, ArchiveRecord};
use report::Summary;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// # Archive Arguments (`ArchiveArgs`)
///
/// Command-line flags for an archiving run. Options left unset fall back to
/// the configuration file and then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ArchiveArgs {
    /// Directory containing the log files to archive [default: current directory]
    #[arg(value_name = "LOG_DIRECTORY", conflicts_with = "windows_logs")]
    pub log_directory: Option<PathBuf>,

    /// Archive the Windows Event Log directory (%SystemDrive%\Windows\System32\winevt\Logs)
    #[arg(long)]
    pub windows_logs: bool,

    /// Directory receiving the archive [default: ./archived_logs]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File recording every archive operation [default: archive_log.txt]
    #[arg(short, long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Comma-separated glob patterns; only matching file names are archived
    #[arg(short, long, value_name = "PATTERNS")]
    pub include: Option<String>,

    /// Comma-separated glob patterns; matching file names are never archived
    #[arg(short, long, value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Read settings from this TOML file instead of the user/project files
    #[arg(long, value_name = "FILE", env = "LOG_ARCHIVE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Everything one run needs, resolved once and passed to every stage.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
    pub filter: LogFilter,
    pub compression_level: u32,
}

impl ArchiveRequest {
    /// Merges command-line flags over the loaded configuration.
    pub fn from_args(args: &ArchiveArgs, verbose: bool, cfg: &Config) -> Result<Self> {
        let source_dir = if args.windows_logs {
            let dir = system::windows_logs_dir();
            info!("Using Windows logs directory: {}", dir.display());
            dir
        } else {
            args.log_directory
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let include = match &args.include {
            Some(list) => split_patterns(list),
            None => cfg.filter.include.clone(),
        };
        let exclude = match &args.exclude {
            Some(list) => split_patterns(list),
            None => cfg.filter.exclude.clone(),
        };

        Ok(Self {
            source_dir,
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&cfg.archive.output_dir)),
            log_file: args
                .log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&cfg.archive.log_file)),
            verbose,
            filter: LogFilter::new(&include, &exclude)?,
            compression_level: cfg.archive.compression_level,
        })
    }
}

/// # Handle Archive Command (`handle_archive`)
///
/// Entry point called from `main`: loads configuration, builds the
/// `ArchiveRequest` and runs the pipeline.
pub fn handle_archive(args: ArchiveArgs, verbose: bool) -> Result<()> {
    let cfg = config::load_config(args.config.as_deref())?;
    let request = ArchiveRequest::from_args(&args, verbose, &cfg)?;
    debug!("Resolved archive request: {:?}", request);
    run_archive(&request).map(|_| ())
}

/// Runs Validate → Discover → Archive → Record for `request`.
pub fn run_archive(request: &ArchiveRequest) -> Result<ArchiveOutcome> {
    let timestamp = Local::now();
    info!(
        "Starting log archive process for: {}",
        request.source_dir.display()
    );
    if request.verbose {
        println!("Operating system: {}", system::os_description());
    }

    let source_dir = validate_source_dir(&request.source_dir)?;

    let files: Vec<_> = discover_log_files(
        &source_dir,
        &request.filter,
        &[request.output_dir.as_path(), request.log_file.as_path()],
    )?
    .collect();
    if files.is_empty() {
        anyhow::bail!(ArchiveError::NoFilesFound { path: source_dir });
    }

    let original_size = total_size(&files);
    info!(
        "Found {} log file(s), {} bytes in total",
        files.len(),
        original_size
    );
    if request.verbose {
        println!("Source directory: {}", source_dir.display());
        println!("Number of log files found: {}", files.len());
        report::print_file_listing(&files);
    }

    let total = files.len();
    let outcome = write_log_archive(
        files,
        &request.output_dir,
        &timestamp,
        request.compression_level,
        |done, file| {
            if request.verbose {
                println!("{}", report::format_progress(done, total, file));
            }
        },
    )?;

    let record = ArchiveRecord {
        timestamp,
        source_dir: source_dir.clone(),
        archive_path: outcome.path.clone(),
        archive_size: outcome.size,
    };
    if let Err(e) = append_record(&request.log_file, &record) {
        warn!(
            "Archive was created at {} but the operation could not be logged",
            outcome.path.display()
        );
        return Err(e);
    }

    report::print_summary(&Summary {
        source_dir: &source_dir,
        file_count: outcome.entries,
        original_size,
        archive_path: &outcome.path,
        archive_size: outcome.size,
        log_file: &request.log_file,
    });

    Ok(outcome)
}
