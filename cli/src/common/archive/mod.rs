//! # log-archive Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive creation for the tool. The only supported container is a gzipped
//! tarball, implemented in the `tar` submodule:
//!
//! - **`tar`**: Timestamped archive naming (`archive_file_name`) and the
//!   archive builder (`write_log_archive`).
//!
//! ```rust
//! use crate::common::archive;
//!
//! let outcome = archive::tar::write_log_archive(files, output_dir, &now, 6, |_, _| {})?;
//! ```
//!

pub mod tar;
