//! Keeps a second server process from writing the same data file.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// `events.json` is guarded by `events.json.lock` next to it
pub fn lock_path(data_file: &Path) -> PathBuf {
    let mut name = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "events".into());
    name.push(".lock");
    data_file.with_file_name(name)
}

/// Acquire an exclusive lock on the data file, failing if another instance holds it
pub fn acquire_lock(data_file: &Path) -> Result<LockGuard> {
    let path = lock_path(data_file);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another agenda-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            data_file.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
