// Cache tuning values.
// Explicit per-instance configuration; there are no process-wide defaults
// beyond the constants below.

/// Default entry expire time: 5 minutes.
pub const DEFAULT_ENTRY_EXPIRE_SECS: i64 = 5 * 60;

/// Default interval between garbage collection sweeps: 1 hour.
pub const DEFAULT_GC_INTERVAL_SECS: i64 = 60 * 60;

/// Tuning values for one cache instance.
///
/// Both values are plain seconds and accept any integer. A non-positive
/// expire time makes every entry expired; a non-positive interval makes a
/// sweep due on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Seconds an entry stays live after it was last written or read.
    pub entry_expire_secs: i64,
    /// Seconds between throttled garbage collection sweeps.
    pub gc_interval_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_expire_secs: DEFAULT_ENTRY_EXPIRE_SECS,
            gc_interval_secs: DEFAULT_GC_INTERVAL_SECS,
        }
    }
}
