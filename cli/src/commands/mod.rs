//! # log-archive Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Command implementations invoked from `main.rs`. The tool currently exposes
//! a single command whose flags sit at the top level of the CLI:
//!
//! - `archive`: discover log files, build the archive, record the operation and report
//!
//! The command defines its own argument struct (`ArchiveArgs`) and a handler
//! (`handle_archive`) that returns a `Result` for `main` to turn into an exit code.
//!

/// Log discovery, archiving, operation recording and summary reporting.
pub mod archive;
