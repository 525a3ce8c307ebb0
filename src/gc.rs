// Garbage collection of expired entries.
// Sweeps are throttled through a durable marker file so the schedule holds
// even when every call runs in a fresh process.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::error::Result;
use crate::paths;
use crate::store;

/// Whether enough time has passed since the last completed sweep to
/// justify another. A missing marker means no sweep has ever completed;
/// a non-positive interval makes a sweep due on every access.
pub(crate) fn collection_due(root: &Path, interval_secs: i64) -> bool {
    if interval_secs <= 0 {
        return true;
    }
    let marker = paths::marker_path(root);
    let Ok(modified) = fs::metadata(&marker).and_then(|meta| meta.modified()) else {
        return true;
    };
    let elapsed = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    elapsed > Duration::from_secs(interval_secs as u64)
}

/// Delete every expired file in the store, then stamp the marker.
///
/// Best-effort pass: per-file failures are logged and skipped so one bad
/// entry cannot block reclamation of the rest. The marker is stamped even
/// when nothing was evicted.
pub(crate) fn collect(root: &Path, expire_secs: i64) -> Result<usize> {
    let mut evicted = 0;
    for dir_entry in fs::read_dir(root)? {
        let dir_entry = match dir_entry {
            Ok(dir_entry) => dir_entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if dir_entry.file_name() == paths::GC_MARKER_FILE {
            continue;
        }
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        if store::is_live(&path, expire_secs) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                evicted += 1;
                debug!(path = %path.display(), "evicted expired entry");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to delete expired entry");
            }
        }
    }
    stamp_marker(root)?;
    debug!(evicted, "garbage collection pass complete");
    Ok(evicted)
}

/// Record completion of a sweep by refreshing the marker's timestamp,
/// creating the marker file on the first pass.
fn stamp_marker(root: &Path) -> Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(paths::marker_path(root))?;
    file.set_modified(SystemTime::now())?;
    Ok(())
}
