//! # log-archive Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem-facing pieces of the pipeline:
//!
//! - **`discovery`**: Validates the source directory and walks it for log files (`discover_log_files`, `LogFilter`, `DiscoveredFile`).
//! - **`io`**: Directory creation and append-only writes used by the archive builder and the operation recorder.
//!
//! Callers import from the specific submodule, e.g.
//! `use crate::common::fs::discovery::discover_log_files;`.
//!

/// Source-directory validation and log file discovery.
pub mod discovery;
/// Basic file I/O operations (`ensure_dir_exists`, `append_string_to_file`).
pub mod io;
