//! # log-archive Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every stage of the
//! archiving pipeline:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types, exit codes and the `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ArchiveError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
