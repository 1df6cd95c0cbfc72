//! Sidecar file synchronization.
//!
//! Decides whether the EDL sidecar for a media file needs to be created,
//! refreshed, or left alone, and performs the write. The decision policy is
//! idempotent: running the same sync twice performs exactly one write. The
//! synchronizer never deletes an existing sidecar, even when no content was
//! generated for the item.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use edlsync_core::{Error, Result};

/// Extension used for EDL sidecar files.
pub const EDL_EXTENSION: &str = "edl";

/// Result of synchronizing one sidecar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// No sidecar existed; one was written.
    Created,
    /// A sidecar existed with different content and was overwritten.
    Updated,
    /// A sidecar exists and was left untouched (overwrite disabled, or the
    /// content already matches).
    Skipped,
    /// Nothing was written: no content was generated for the item, or its
    /// media file is not materialized on disk.
    NoContent,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Skipped => write!(f, "skipped"),
            Self::NoContent => write!(f, "no content"),
        }
    }
}

/// Given the path to a media file, return the path to its EDL sidecar.
#[must_use]
pub fn edl_path(media_path: &Path) -> PathBuf {
    media_path.with_extension(EDL_EXTENSION)
}

/// Read the current sidecar content, treating any read failure (permissions,
/// encoding, transient I/O) as empty content. Existence is decided by the
/// caller's separate check, never by whether this read succeeded.
fn read_existing_or_empty(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(
                "Treating unreadable EDL file '{}' as empty: {e}",
                path.display()
            );
            String::new()
        }
    }
}

/// Synchronize the EDL sidecar of one media file with newly encoded content.
///
/// Policy:
/// - empty `new_text` never touches disk, even if a sidecar already exists
/// - a missing media file means there is nothing to attach a sidecar to
/// - an existing sidecar is only overwritten when `force_overwrite` or
///   `overwrite_enabled` is set, and only when its content actually differs
///   (identical content would just thrash modification timestamps)
///
/// # Errors
///
/// Returns [`Error::Sync`] when the write itself fails. Read failures on the
/// existing sidecar are tolerated and never propagate.
pub fn sync_file(
    media_path: &Path,
    new_text: &str,
    force_overwrite: bool,
    overwrite_enabled: bool,
) -> Result<SyncOutcome> {
    if new_text.is_empty() {
        return Ok(SyncOutcome::NoContent);
    }

    // Guard for missing media file/folder.
    if !media_path.exists() {
        tracing::debug!("Media file missing, not writing EDL: '{}'", media_path.display());
        return Ok(SyncOutcome::NoContent);
    }

    let edl = edl_path(media_path);
    let exists = edl.exists();

    if !exists {
        write_sidecar(&edl, new_text)?;
        tracing::debug!("Create EDL file '{}'", edl.display());
        return Ok(SyncOutcome::Created);
    }

    // User may not want an override.
    if !(force_overwrite || overwrite_enabled) {
        tracing::debug!("EDL file exists, but overwrite is disabled: '{}'", edl.display());
        return Ok(SyncOutcome::Skipped);
    }

    let old_content = read_existing_or_empty(&edl);
    if !old_content.is_empty() && old_content != new_text {
        write_sidecar(&edl, new_text)?;
        tracing::debug!("Overwrite/Update EDL file '{}'", edl.display());
        return Ok(SyncOutcome::Updated);
    }

    Ok(SyncOutcome::Skipped)
}

fn write_sidecar(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::sync(path.display().to_string(), e.to_string()))
}
