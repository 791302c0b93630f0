//! # log-archive TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! Builds the gzipped tarball (`.tar.gz`) holding the discovered log files.
//! The archive is named after the run timestamp,
//! `logs_archive_<YYYYMMDD_HHMMSS>.tar.gz`, and every entry is stored under
//! its path relative to the source directory.
//!
//! ## Architecture
//!
//! The `tar` crate builds the archive structure and `flate2` compresses it.
//!
//! - Data is streamed to `.<archive name>.partial` in the output directory.
//! - Once the tar and gzip streams are finished and synced, the partial file is
//!   renamed to the final name.
//! - On any failure the partial file is removed and
//!   `ArchiveError::ArchiveWrite` is returned, so no truncated archive is
//!   left behind.
//!
//! A file that disappeared between discovery and writing is skipped with a
//! warning. Any other read failure aborts the whole archive. Each entry holds
//! the file as it was when opened: bytes appended while it is being copied are
//! left for the next run, and a file that shrinks mid-copy is a read failure.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::tar;
//!
//! let now = chrono::Local::now();
//! let outcome = tar::write_log_archive(files, Path::new("./archived_logs"), &now, 6, |n, file| {
//!     println!("[{}] {}", n, file.relative_path.display());
//! })?;
//! println!("{} ({} bytes)", outcome.path.display(), outcome.size);
//! ```
//!
use crate::common::fs::discovery::DiscoveredFile;
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{ArchiveError, Result};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Local};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name prefix shared by every archive.
pub const ARCHIVE_PREFIX: &str = "logs_archive_";
/// Extension of the compressed container.
pub const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// Result of a successful archive write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Final location of the archive.
    pub path: PathBuf,
    /// Archive size in bytes as reported by the filesystem.
    pub size: u64,
    /// Number of files stored.
    pub entries: usize,
}

/// Builds `logs_archive_<YYYYMMDD_HHMMSS>.tar.gz` for `timestamp`.
pub fn archive_file_name(timestamp: &DateTime<Local>) -> String {
    format!(
        "{}{}{}",
        ARCHIVE_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S"),
        ARCHIVE_EXTENSION
    )
}

/// # Write Log Archive (`write_log_archive`)
///
/// Writes `files` into a new gzipped tarball inside `output_dir`, creating the
/// directory if needed.
///
/// ## Arguments
///
/// * `files` - Files to store; each is added once under its relative path.
/// * `output_dir` - Directory receiving the archive.
/// * `timestamp` - Run timestamp used for the archive name.
/// * `compression_level` - Gzip level, 0 to 9.
/// * `on_entry` - Called after each file is stored, with the running entry
///   count and the file.
///
/// ## Errors
///
/// Returns `ArchiveError::ArchiveWrite` if the output directory cannot be
/// prepared, a file cannot be read, or the streams cannot be finished.
pub fn write_log_archive<I, F>(
    files: I,
    output_dir: &Path,
    timestamp: &DateTime<Local>,
    compression_level: u32,
    on_entry: F,
) -> Result<ArchiveOutcome>
where
    I: IntoIterator<Item = DiscoveredFile>,
    F: FnMut(usize, &DiscoveredFile),
{
    let name = archive_file_name(timestamp);
    let final_path = output_dir.join(&name);

    ensure_dir_exists(output_dir).map_err(|e| archive_write_error(&final_path, &e))?;

    let partial_path = output_dir.join(format!(".{name}.partial"));
    debug!("Writing archive data to {}", partial_path.display());

    let entries = match write_tar_gz(&partial_path, files, compression_level, on_entry) {
        Ok(entries) => entries,
        Err(e) => {
            remove_partial(&partial_path);
            return Err(archive_write_error(&final_path, &e));
        }
    };

    if let Err(e) = fs::rename(&partial_path, &final_path) {
        remove_partial(&partial_path);
        return Err(archive_write_error(&final_path, &anyhow!(e)));
    }

    let size = fs::metadata(&final_path)
        .map_err(|e| archive_write_error(&final_path, &anyhow!(e)))?
        .len();
    info!(
        "Archive created: {} ({} entries, {} bytes)",
        final_path.display(),
        entries,
        size
    );

    Ok(ArchiveOutcome {
        path: final_path,
        size,
        entries,
    })
}

fn write_tar_gz<I, F>(
    path: &Path,
    files: I,
    compression_level: u32,
    mut on_entry: F,
) -> Result<usize>
where
    I: IntoIterator<Item = DiscoveredFile>,
    F: FnMut(usize, &DiscoveredFile),
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create archive file '{}'", path.display()))?;
    let enc = GzEncoder::new(BufWriter::new(file), Compression::new(compression_level));
    let mut tar_builder = tar::Builder::new(enc);

    let mut entries = 0;
    for discovered in files {
        let source = match File::open(&discovered.absolute_path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Skipping '{}': file no longer exists",
                    discovered.absolute_path.display()
                );
                continue;
            }
            Err(e) => {
                return Err(anyhow!(e).context(format!(
                    "Failed to open '{}'",
                    discovered.absolute_path.display()
                )))
            }
        };
        append_snapshot(&mut tar_builder, &discovered, source).with_context(|| {
            format!(
                "Failed to add '{}' to the tar archive",
                discovered.absolute_path.display()
            )
        })?;
        debug!("Added {}", discovered.relative_path.display());
        entries += 1;
        on_entry(entries, &discovered);
    }

    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    let writer = encoder
        .finish()
        .context("Failed to finish gzip compression stream")?;
    let file = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush archive data: {}", e.error()))?;
    file.sync_all().context("Failed to sync archive to disk")?;

    Ok(entries)
}

/// Stores the first `len` bytes of `source`, where `len` is the size of the
/// open handle at the time it is added.
///
/// Bytes appended by a concurrent writer afterwards are left out, and a file
/// that shrinks mid-copy is a read error, so the header size always matches
/// the data written.
fn append_snapshot<W: Write>(
    tar_builder: &mut tar::Builder<W>,
    discovered: &DiscoveredFile,
    source: File,
) -> Result<()> {
    let meta = source
        .metadata()
        .context("Failed to read file metadata")?;
    if !meta.is_file() {
        anyhow::bail!("'{}' is not a regular file", discovered.absolute_path.display());
    }
    let mut header = tar::Header::new_gnu();
    header.set_metadata(&meta);
    header.set_size(meta.len());
    let reader = ExactReader::new(source, meta.len());
    tar_builder.append_data(&mut header, &discovered.relative_path, reader)?;
    Ok(())
}

/// Reads exactly `remaining` bytes, failing with `UnexpectedEof` if the
/// source ends early.
struct ExactReader<R> {
    inner: io::Take<R>,
    remaining: u64,
}

impl<R: Read> ExactReader<R> {
    fn new(inner: R, len: u64) -> Self {
        Self {
            inner: inner.take(len),
            remaining: len,
        }
    }
}

impl<R: Read> Read for ExactReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && self.remaining > 0 && !buf.is_empty() {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("file shrank while archiving ({} bytes missing)", self.remaining),
            ));
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!("Could not remove partial archive '{}': {}", path.display(), e);
        }
    }
}

fn archive_write_error(path: &Path, err: &anyhow::Error) -> anyhow::Error {
    ArchiveError::ArchiveWrite {
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    }
    .into()
}
