//! Local liked-state stores.
//!
//! One boolean per document identifier, namespaced under `postLike:`.
//! Presence of the key means "liked". The [`LikeStore`] capability is
//! infallible by contract: an unavailable storage medium reads as
//! "not liked" and writes are silently dropped, so the reconciler never
//! has to handle storage errors.

use dashmap::DashSet;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Namespace prefix for persisted keys.
pub const KEY_PREFIX: &str = "postLike:";

/// Capability for the client-local liked cache.
pub trait LikeStore: Send + Sync {
    /// Whether the current actor has liked this document.
    fn get(&self, id: &str) -> bool;

    /// Record the liked state: `true` stores the entry, `false` removes it.
    fn set(&self, id: &str, liked: bool);

    /// Remove the entry for this document.
    fn clear(&self, id: &str);
}

/// In-memory store. State lives for the process lifetime only.
#[derive(Debug, Default)]
pub struct MemoryLikeStore {
    liked: DashSet<String>,
}

impl MemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LikeStore for MemoryLikeStore {
    fn get(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    fn set(&self, id: &str, liked: bool) {
        if liked {
            self.liked.insert(id.to_string());
        } else {
            self.liked.remove(id);
        }
    }

    fn clear(&self, id: &str) {
        self.liked.remove(id);
    }
}

/// File-backed store: a JSON map of `postLike:<id>` keys persisted on
/// every mutation.
///
/// All filesystem work is best-effort. A missing or corrupt file opens
/// as an empty store; a failed write keeps the in-memory state and moves
/// on.
#[derive(Debug)]
pub struct FileLikeStore {
    path: PathBuf,
    liked: DashSet<String>,
}

impl FileLikeStore {
    /// Open the store at `path`, loading any previously persisted state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let liked = DashSet::new();

        if let Ok(raw) = fs::read_to_string(&path) {
            match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
                Ok(entries) => {
                    for (key, value) in entries {
                        if value && let Some(id) = key.strip_prefix(KEY_PREFIX) {
                            liked.insert(id.to_string());
                        }
                    }
                }
                Err(e) => {
                    log::debug!("ignoring unreadable like store at {}: {}", path.display(), e);
                }
            }
        }

        Self { path, liked }
    }

    fn persist(&self) {
        let entries: BTreeMap<String, bool> = self
            .liked
            .iter()
            .map(|id| (format!("{KEY_PREFIX}{}", id.as_str()), true))
            .collect();

        match serde_json::to_string_pretty(&entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::debug!("like store write to {} failed: {}", self.path.display(), e);
                }
            }
            Err(e) => log::debug!("like store serialization failed: {}", e),
        }
    }
}

impl LikeStore for FileLikeStore {
    fn get(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    fn set(&self, id: &str, liked: bool) {
        if liked {
            self.liked.insert(id.to_string());
        } else {
            self.liked.remove(id);
        }
        self.persist();
    }

    fn clear(&self, id: &str) {
        self.liked.remove(id);
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryLikeStore::new();
        assert!(!store.get("a"));

        store.set("a", true);
        assert!(store.get("a"));

        store.set("a", false);
        assert!(!store.get("a"));

        store.set("b", true);
        store.clear("b");
        assert!(!store.get("b"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("likes.json");

        {
            let store = FileLikeStore::open(&path);
            store.set("kept", true);
            store.set("dropped", true);
            store.set("dropped", false);
        }

        let reopened = FileLikeStore::open(&path);
        assert!(reopened.get("kept"));
        assert!(!reopened.get("dropped"));
    }

    #[test]
    fn test_file_store_uses_namespaced_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("likes.json");

        let store = FileLikeStore::open(&path);
        store.set("entry", true);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"postLike:entry\""));
    }

    #[test]
    fn test_file_store_swallows_unavailable_medium() {
        let path = PathBuf::from("/nonexistent-dir/likes.json");
        let store = FileLikeStore::open(&path);

        // Writes fail silently; reads still reflect in-memory state.
        store.set("a", true);
        assert!(store.get("a"));
        assert!(!store.get("b"));
    }

    #[test]
    fn test_file_store_ignores_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("likes.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileLikeStore::open(&path);
        assert!(!store.get("anything"));
    }
}
