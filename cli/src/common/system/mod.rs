//! # log-archive System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host inspection helpers used while resolving the source directory and
//! printing verbose diagnostics:
//!
//! - **`windows_logs_dir`**: Location of the Windows Event Log files,
//!   `%SystemDrive%\Windows\System32\winevt\Logs` (`SystemDrive` defaults to `C:`).
//! - **`os_description`**: Short description of the running platform.
//!
use std::env;
use std::path::PathBuf;

/// Drive used when `SystemDrive` is not set.
const DEFAULT_SYSTEM_DRIVE: &str = "C:";

/// Returns the Windows Event Log directory for the current `SystemDrive`.
pub fn windows_logs_dir() -> PathBuf {
    let drive = env::var("SystemDrive").unwrap_or_else(|_| DEFAULT_SYSTEM_DRIVE.to_string());
    windows_logs_dir_on(&drive)
}

fn windows_logs_dir_on(drive: &str) -> PathBuf {
    // `C:` alone is drive-relative on Windows; anchor it at the root.
    let mut path = PathBuf::from(format!("{}\\", drive.trim_end_matches(['\\', '/'])));
    path.push("Windows");
    path.push("System32");
    path.push("winevt");
    path.push("Logs");
    path
}

/// Operating system and architecture, e.g. `linux (x86_64)`.
pub fn os_description() -> String {
    format!("{} ({})", env::consts::OS, env::consts::ARCH)
}
