//! # log-archive Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point for the `log-archive` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the archive command
//! - Turning errors into a message on stderr and a process exit code
//!
//! ## Exit Codes
//!
//! - `0`: archive created and operation logged
//! - `1`: missing/unreadable directory, bad configuration, archive or log write failure
//! - `2`: invalid command-line arguments (reported by Clap)
//! - `3`: no log files found, nothing archived
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! log-archive --help
//!
//! # Archive /var/log/myapp with diagnostics
//! log-archive -v /var/log/myapp
//!
//! # Debug-level tracing output
//! log-archive -vv /var/log/myapp
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // The archive command (pipeline, recorder, reporter).
mod common; // Shared utilities (archive, fs, system).
mod core; // Core infrastructure (errors, config).

use crate::core::error::{ArchiveError, EXIT_FAILURE};

/// Defines the command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "log-archive",
    about = "Compress and archive log files",
    long_about = "Discovers log files in a directory and bundles them into a timestamped\n\
                  .tar.gz archive, recording every run in an operation log.",
    version
)]
struct Cli {
    #[command(flatten)]
    archive: commands::archive::ArchiveArgs,
    /// Increase output verbosity (-v diagnostics, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::archive::handle_archive(cli.archive, cli.verbose > 0) {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        let archive_error = e.downcast_ref::<ArchiveError>();
        if let Some(ArchiveError::PermissionDenied { .. }) = archive_error {
            eprintln!("Try running as Administrator (or with sudo) if necessary.");
        }
        std::process::exit(archive_error.map_or(EXIT_FAILURE, ArchiveError::exit_code));
    }
}
