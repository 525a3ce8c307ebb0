//! Filesystem-backed key/value cache with per-entry time expiry and
//! throttled garbage collection.
//!
//! Every entry is one file in a flat directory, named after the digest of
//! its key; the file's own modification time is the entry's liveness clock.
//! Expired entries read as absent whether or not their files still exist,
//! so correctness never depends on a background thread. A durable marker
//! file throttles full-store sweeps, which only reclaim disk space.

mod config;
mod error;
mod gc;
mod paths;
mod store;

pub use config::{CacheConfig, DEFAULT_ENTRY_EXPIRE_SECS, DEFAULT_GC_INTERVAL_SECS};
pub use error::{CacheError, Result};
pub use paths::{default_root, entry_filename};
pub use store::FlatDirCache;
