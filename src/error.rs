// Error types for the cache.
// Distinguishes expected misses from storage failures the caller must handle.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// The key is absent or its entry expired. Expected and recoverable;
    /// absence and expiry are not distinguished.
    #[error("cache entry not found: {0}")]
    NotFound(String),

    /// The cache directory or an entry file could not be created, read,
    /// or written. Not retried by the cache itself.
    #[error("cache storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;
