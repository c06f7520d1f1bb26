//! Scoped temporary storage for an upload under inspection.
//!
//! The staged file lives exactly as long as its `StagedFile` guard. Dropping
//! the guard overwrites the content with random bytes and unlinks it, so
//! success, rejection, extraction failure and cancellation all clean up.

use std::fs;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::time::{Duration, SystemTime};

use rand::RngCore;
use tempfile::NamedTempFile;

/// Prefix for every staged upload; startup cleanup keys on it.
pub const STAGING_PREFIX: &str = "langscan-";

/// Staged files older than this are treated as orphans of a crashed process.
const ORPHAN_AGE: Duration = Duration::from_secs(60 * 60);

/// Temp copy of an upload. Removed on drop.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Write `bytes` to a fresh temp file in the system temp directory.
    pub fn stage(bytes: &[u8]) -> std::io::Result<Self> {
        Self::stage_in(&std::env::temp_dir(), bytes)
    }

    pub fn stage_in(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), size = bytes.len(), "Upload staged");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // NamedTempFile unlinks after this; overwrite first.
        if let Err(e) = overwrite_with_random(self.file.as_file_mut()) {
            tracing::warn!(path = %self.file.path().display(), "Staged file overwrite failed: {e}");
        }
        tracing::debug!(path = %self.file.path().display(), "Staged upload released");
    }
}

fn overwrite_with_random(file: &mut fs::File) -> std::io::Result<()> {
    let len = file.metadata()?.len() as usize;
    if len == 0 {
        return Ok(());
    }

    file.seek(SeekFrom::Start(0))?;
    let mut buf = vec![0u8; len.min(64 * 1024)];
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(buf.len());
        rand::thread_rng().fill_bytes(&mut buf[..chunk]);
        file.write_all(&buf[..chunk])?;
        remaining -= chunk;
    }
    file.sync_all()
}

/// Remove staged uploads left behind by a previous crash.
///
/// Called at startup. Only files carrying `STAGING_PREFIX` and older than an
/// hour are touched.
pub fn cleanup_orphaned_staging(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let now = SystemTime::now();
    let mut cleaned = 0usize;

    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().starts_with(STAGING_PREFIX) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let age = metadata
            .modified()
            .ok()
            .and_then(|m| now.duration_since(m).ok())
            .unwrap_or_default();
        if age < ORPHAN_AGE {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => cleaned += 1,
            Err(e) => tracing::warn!(path = %entry.path().display(), "Orphan cleanup failed: {e}"),
        }
    }

    if cleaned > 0 {
        tracing::info!(cleaned, "Removed orphaned staged uploads");
    }
    cleaned
}
