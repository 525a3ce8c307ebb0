// Cache store for reading and writing entries.
// Handles key mapping, liveness checking, and filesystem operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::warn;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::gc;
use crate::paths;

/// Filesystem-backed key/value cache over a single flat directory.
///
/// Each entry is one file named after the digest of its key; the file's
/// modification time is the entry's liveness clock. All durable state lives
/// on the filesystem, so handles are cheap and short-lived callers get
/// correct expiry across process restarts.
pub struct FlatDirCache {
    root: PathBuf,
    config: CacheConfig,
}

impl FlatDirCache {
    /// Create a cache over `root` with default tuning values.
    /// Touches no filesystem state until the first access.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, CacheConfig::default())
    }

    /// Create a cache over `root` with explicit tuning values.
    pub fn with_config(root: impl Into<PathBuf>, config: CacheConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The directory backing this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entry expire time, in seconds.
    pub fn entry_expire_time(&self) -> i64 {
        self.config.entry_expire_secs
    }

    /// Set the entry expire time, in seconds.
    /// Non-positive values make every entry expired.
    pub fn set_entry_expire_time(&mut self, expire_secs: i64) {
        self.config.entry_expire_secs = expire_secs;
    }

    /// Garbage collection interval, in seconds.
    pub fn garbage_collection_interval(&self) -> i64 {
        self.config.gc_interval_secs
    }

    /// Set the garbage collection interval, in seconds.
    /// Non-positive values force a sweep on every access.
    pub fn set_garbage_collection_interval(&mut self, interval_secs: i64) {
        self.config.gc_interval_secs = interval_secs;
    }

    /// Ensure the cache directory exists, creating it and any missing
    /// ancestors. Idempotent; called before every other operation.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Whether a live entry exists for `key`.
    /// Pure observer: does not refresh the entry's liveness clock.
    /// Absence and expiry both read as `false`.
    pub fn has_key(&self, key: &str) -> bool {
        if self.init().is_err() {
            return false;
        }
        let live = is_live(
            &paths::entry_path(&self.root, key),
            self.config.entry_expire_secs,
        );
        self.maybe_collect();
        live
    }

    /// Read the content of a live entry, refreshing its liveness clock.
    /// This is the only read that extends an entry's time to live.
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.init()?;
        let path = paths::entry_path(&self.root, key);
        if !is_live(&path, self.config.entry_expire_secs) {
            self.maybe_collect();
            return Err(CacheError::NotFound(key.to_string()));
        }
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.maybe_collect();
                return Err(CacheError::NotFound(key.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        match touch(&path) {
            Ok(()) => {}
            // Entry swept between read and touch; the content is already ours.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        self.maybe_collect();
        Ok(content)
    }

    /// Write an entry, creating it if absent and fully replacing any
    /// previous content. Refreshes the liveness clock unconditionally.
    pub fn set(&self, key: &str, content: impl AsRef<[u8]>) -> Result<()> {
        self.init()?;
        let path = paths::entry_path(&self.root, key);
        write_atomic(&path, content.as_ref())?;
        self.maybe_collect();
        Ok(())
    }

    /// Delete the entry for `key` if present; a missing entry is not an error.
    pub fn delete_key(&self, key: &str) -> Result<()> {
        self.init()?;
        let path = paths::entry_path(&self.root, key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        self.maybe_collect();
        Ok(())
    }

    /// Delete every entry in the store. The garbage collection marker is
    /// kept, so a later throttled sweep still runs on schedule. Idempotent.
    pub fn clean_cache(&self) -> Result<()> {
        self.init()?;
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if dir_entry.file_name() == paths::GC_MARKER_FILE {
                continue;
            }
            let path = dir_entry.path();
            if path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Scan the whole store and delete every expired entry.
    ///
    /// Runs unconditionally and stamps the marker on completion even when
    /// nothing was evicted. Returns the number of entries removed.
    pub fn garbage_collect(&self) -> Result<usize> {
        self.init()?;
        gc::collect(&self.root, self.config.entry_expire_secs)
    }

    /// Run a sweep if the interval has elapsed since the last one.
    /// Failures are logged, not surfaced: a throttled sweep is a side
    /// effect and must not break the access that triggered it.
    fn maybe_collect(&self) {
        if !gc::collection_due(&self.root, self.config.gc_interval_secs) {
            return;
        }
        if let Err(err) = gc::collect(&self.root, self.config.entry_expire_secs) {
            warn!(error = %err, "throttled garbage collection failed");
        }
    }
}

/// An entry is live iff its age does not exceed the expire time.
/// Missing files and unreadable metadata read as expired; a modification
/// time in the future reads as age zero.
pub(crate) fn is_live(path: &Path, expire_secs: i64) -> bool {
    if expire_secs <= 0 {
        return false;
    }
    let Ok(modified) = fs::metadata(path).and_then(|meta| meta.modified()) else {
        return false;
    };
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    age <= Duration::from_secs(expire_secs as u64)
}

/// Refresh an existing file's modification time to now.
pub(crate) fn touch(path: &Path) -> io::Result<()> {
    let file = fs::OpenOptions::new().write(true).open(path)?;
    file.set_modified(SystemTime::now())
}

/// Write content atomically via a sibling temp file so readers never
/// observe a partially written entry.
fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
