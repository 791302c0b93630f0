//! # log-archive Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the optional TOML configuration
//! that supplies defaults for the archiving run: where archives go, where the
//! operation log lives, how hard to compress, and which file-name patterns to
//! include or exclude. Command-line flags always win over anything set here.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` / `LOG_ARCHIVE_CONFIG` (replaces 2 and 3)
//! 2. Project-specific `.log-archive.toml` in the current directory or ancestors
//! 3. User-specific `<config dir>/log-archive/config.toml`
//! 4. Default values defined in the code
//!
//! The ancestor search for the project file stops at the first directory
//! containing `.git`. Paths are tilde-expanded and the merged result is
//! validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [archive]
//! output_dir = "~/archives/logs"
//! log_file = "~/archives/archive_log.txt"
//! compression_level = 9
//!
//! [filter]
//! include = ["*.log", "*.txt"]
//! exclude = ["debug*"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let level = cfg.archive.compression_level;
//! ```
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file searched for in ancestors.
pub const PROJECT_CONFIG_FILENAME: &str = ".log-archive.toml";

/// Highest gzip level accepted by `flate2`.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveSettings,
    #[serde(default)]
    pub filter: FilterSettings,
}

/// Where and how archives are written.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveSettings {
    /// Directory receiving `logs_archive_*.tar.gz` files (can use ~).
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Append-only operation log (can use ~).
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Gzip level, 0 (store) to 9 (best).
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            log_file: default_log_file(),
            compression_level: default_compression_level(),
        }
    }
}

/// File-name patterns narrowing discovery.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterSettings {
    /// When non-empty, only names matching one of these globs are archived.
    #[serde(default)]
    pub include: Vec<String>,
    /// Names matching any of these globs are never archived.
    #[serde(default)]
    pub exclude: Vec<String>,
}

pub fn default_output_dir() -> String {
    "./archived_logs".to_string()
}
pub fn default_log_file() -> String {
    "archive_log.txt".to_string()
}
fn default_compression_level() -> u32 {
    6
}

/// Loads the effective configuration.
///
/// With `explicit_path` set, only that file is read and it must exist.
/// Otherwise the user and project files are merged over the defaults;
/// both are optional.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    let mut config = match explicit_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "log-archive") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

/// Walks from `start` up through its ancestors looking for the project file.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(ArchiveError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        )))
    })
}

/// Project values override user values wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.archive.output_dir = if project_cfg.archive.output_dir != default_output_dir() {
        project_cfg.archive.output_dir
    } else {
        user.archive.output_dir
    };
    merged.archive.log_file = if project_cfg.archive.log_file != default_log_file() {
        project_cfg.archive.log_file
    } else {
        user.archive.log_file
    };
    merged.archive.compression_level =
        if project_cfg.archive.compression_level != default_compression_level() {
            project_cfg.archive.compression_level
        } else {
            user.archive.compression_level
        };
    merged.filter.include = if !project_cfg.filter.include.is_empty() {
        project_cfg.filter.include
    } else {
        user.filter.include
    };
    merged.filter.exclude = if !project_cfg.filter.exclude.is_empty() {
        project_cfg.filter.exclude
    } else {
        user.filter.exclude
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.archive.output_dir = shellexpand::tilde(&config.archive.output_dir).into_owned();
    config.archive.log_file = shellexpand::tilde(&config.archive.log_file).into_owned();
    debug!(
        "Expanded archive paths: output_dir={}, log_file={}",
        config.archive.output_dir, config.archive.log_file
    );
}

fn validate_config(config: &Config) -> Result<()> {
    if config.archive.compression_level > MAX_COMPRESSION_LEVEL {
        anyhow::bail!(ArchiveError::Config(format!(
            "compression_level must be between 0 and {}, got {}",
            MAX_COMPRESSION_LEVEL, config.archive.compression_level
        )));
    }
    if config.archive.output_dir.trim().is_empty() {
        anyhow::bail!(ArchiveError::Config("output_dir cannot be empty".into()));
    }
    if config.archive.log_file.trim().is_empty() {
        anyhow::bail!(ArchiveError::Config("log_file cannot be empty".into()));
    }
    let mut patterns = config.filter.include.iter().chain(&config.filter.exclude);
    if patterns.any(|p| p.trim().is_empty()) {
        anyhow::bail!(ArchiveError::Config(
            "filter patterns cannot be empty strings".into()
        ));
    }
    Ok(())
}
