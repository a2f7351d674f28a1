//! Atomic file replacement: write a temp file, then rename it over the target.
//!
//! # Why rename? (for beginners)
//!
//! Writing a file in place first truncates it and then fills it back in.  A
//! reader that opens the file in between sees a half-written document, and a
//! crash in between leaves one on disk for good.
//!
//! A rename within one directory is atomic on every mainstream file system:
//! other processes see either the old file or the new one, never a mix.  So
//! the new content goes to a uniquely named sibling first:
//!
//! ```text
//! 1. write   <dir>/.keyvalues.json.<uuid>.tmp
//! 2. fsync   the temp file (its bytes are on disk)
//! 3. rename  temp → <dir>/keyvalues.json
//! ```
//!
//! If any step fails the temp file is removed and the previous document is
//! left untouched.
//!
//! A symlinked target is resolved first, so the rename lands on the real
//! file and the link survives.  When a file is being replaced, the temp file
//! takes over its permissions before the rename.

use std::fs::{Metadata, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Longest prefix of the target's file name kept in a temp file name.
const MAX_TEMP_STEM: usize = 64;

/// Returns a unique temp file path in the same directory as `target`.
///
/// The name is `.<stem>.<uuid>.tmp`, where `<stem>` is the target's file name
/// cut to at most [`MAX_TEMP_STEM`] bytes, so a long but valid target name
/// never yields a temp name the file system rejects.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let mut end = name.len().min(MAX_TEMP_STEM);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    target.with_file_name(format!(".{}.{}.tmp", &name[..end], Uuid::new_v4().simple()))
}

/// Atomically replaces `target` with `contents`.
///
/// A symlinked `target` is followed: the file it points at is replaced and
/// the link stays in place.  An existing file keeps its permissions.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for any failure while writing, syncing, or
/// renaming.  The temp file is cleaned up before returning.
pub async fn write_atomic(target: &Path, contents: &[u8]) -> Result<()> {
    let resolved = resolved_target(target, tokio::fs::canonicalize(target).await)?;
    let permissions = existing_permissions(target, tokio::fs::metadata(&resolved).await)?;
    let tmp = temp_path_for(&resolved);

    if let Err(source) = write_and_rename(&tmp, &resolved, contents, permissions).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            log_cleanup_failure(&tmp, &cleanup);
        }
        return Err(StoreError::io(target)(source));
    }
    Ok(())
}

/// Blocking counterpart of [`write_atomic`].
///
/// # Errors
///
/// Returns [`StoreError::Io`] for any failure while writing, syncing, or
/// renaming.  The temp file is cleaned up before returning.
pub fn write_atomic_blocking(target: &Path, contents: &[u8]) -> Result<()> {
    let resolved = resolved_target(target, std::fs::canonicalize(target))?;
    let permissions = existing_permissions(target, std::fs::metadata(&resolved))?;
    let tmp = temp_path_for(&resolved);

    if let Err(source) = write_and_rename_blocking(&tmp, &resolved, contents, permissions) {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            log_cleanup_failure(&tmp, &cleanup);
        }
        return Err(StoreError::io(target)(source));
    }
    Ok(())
}

/// The canonical path of `target`, or `target` itself while it does not exist.
fn resolved_target(target: &Path, canonical: std::io::Result<PathBuf>) -> Result<PathBuf> {
    match canonical {
        Ok(path) => Ok(path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(target.to_path_buf()),
        Err(e) => Err(StoreError::io(target)(e)),
    }
}

/// The permissions of the file being replaced, or `None` for a new file.
fn existing_permissions(
    target: &Path,
    metadata: std::io::Result<Metadata>,
) -> Result<Option<Permissions>> {
    match metadata {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(target)(e)),
    }
}

async fn write_and_rename(
    tmp: &Path,
    target: &Path,
    contents: &[u8],
    permissions: Option<Permissions>,
) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions).await?;
    }
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(tmp, target).await
}

fn write_and_rename_blocking(
    tmp: &Path,
    target: &Path,
    contents: &[u8],
    permissions: Option<Permissions>,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(tmp)?;
    file.write_all(contents)?;
    file.flush()?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp, target)
}

fn log_cleanup_failure(tmp: &Path, err: &std::io::Error) {
    if err.kind() != ErrorKind::NotFound {
        warn!(path = %tmp.display(), error = %err, "failed to remove temp file");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
