//! # log-archive Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the `archive` command:
//!
//! - **`archive`**: Creates the timestamped `.tar.gz` archive.
//! - **`fs`**: Source-directory validation, log file discovery and append-only file I/O.
//! - **`system`**: Host inspection (Windows Event Log location, OS description).
//!
//! Command code imports from the specific submodule:
//!
//! ```rust
//! use crate::common::{archive, fs, system};
//!
//! let source = system::windows_logs_dir();
//! let source = fs::discovery::validate_source_dir(&source)?;
//! ```
//!

/// Archive creation (`.tar.gz`).
pub mod archive;
/// Filesystem operations (discovery, I/O).
pub mod fs;
/// Host system helpers.
pub mod system;
