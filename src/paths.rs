// Cache path utilities.
// Maps logical keys to filesystem-safe entry filenames inside the cache root.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

/// Filename of the garbage collection marker inside the cache root.
/// Its modification time is the durable "last completed sweep" clock;
/// its content is irrelevant. Never a valid entry filename.
pub(crate) const GC_MARKER_FILE: &str = ".gc-marker";

/// Map a logical key to its backing filename.
/// The digest keeps arbitrary key strings within filename constraints and
/// always yields the same name for the same key.
pub fn entry_filename(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Full path of the entry file backing a key.
pub(crate) fn entry_path(root: &Path, key: &str) -> PathBuf {
    root.join(entry_filename(key))
}

/// Full path of the garbage collection marker.
pub(crate) fn marker_path(root: &Path) -> PathBuf {
    root.join(GC_MARKER_FILE)
}

/// Default cache root for an application (~/.cache/<app> on Linux).
pub fn default_root(app: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app).map(|dirs| dirs.cache_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_filename_deterministic() {
        let name1 = entry_filename("some key");
        let name2 = entry_filename("some key");
        let name3 = entry_filename("other key");

        assert_eq!(name1, name2);
        assert_ne!(name1, name3);

        // SHA-256 rendered as hex: 64 lowercase hex chars
        assert_eq!(name1.len(), 64);
        assert!(name1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entry_filename_handles_arbitrary_keys() {
        for key in ["", "with/slash", "with:colon", "päth häzärd £$%&", "12345"] {
            let name = entry_filename(key);
            assert_eq!(name.len(), 64);
            assert!(!name.contains('/'));
        }
    }

    #[test]
    fn test_marker_never_collides_with_entries() {
        // Entry names are pure hex; the marker name is not.
        assert!(GC_MARKER_FILE.chars().any(|c| !c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entry_path_under_root() {
        let path = entry_path(Path::new("/tmp/cc"), "prova");
        assert!(path.starts_with("/tmp/cc"));
        assert_eq!(path.file_name().unwrap().len(), 64);
    }
}
