//! # log-archive Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the tool. Every fatal
//! condition the archiving pipeline can hit has a dedicated variant, so the
//! entry point can print a clear message and pick the matching exit code.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ArchiveError`: A custom error enum using `thiserror` for the domain error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Typed errors are raised with `anyhow::bail!(ArchiveError::...)` and travel
//! through `anyhow` untouched; `main` recovers them with `downcast_ref`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     anyhow::bail!(ArchiveError::DirectoryNotFound { path: path.to_path_buf() });
//! }
//!
//! // Pick an exit code at the top level
//! let code = err
//!     .downcast_ref::<ArchiveError>()
//!     .map_or(1, ArchiveError::exit_code);
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for any fatal validation, discovery, write or configuration failure.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a run that found nothing to archive.
pub const EXIT_NO_FILES: i32 = 3;

/// Custom error type for the log-archive tool.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Directory '{}' does not exist", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied while accessing '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("No log files found in '{}'", .path.display())]
    NoFilesFound { path: PathBuf },

    #[error("Failed to create archive '{}': {reason}", .path.display())]
    ArchiveWrite { path: PathBuf, reason: String },

    #[error("Failed to log archive operation to '{}': {reason}", .path.display())]
    LogWrite { path: PathBuf, reason: String },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArchiveError {
    /// Process exit status that reports this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArchiveError::NoFilesFound { .. } => EXIT_NO_FILES,
            _ => EXIT_FAILURE,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
