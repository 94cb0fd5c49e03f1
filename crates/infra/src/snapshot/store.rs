//! Snapshot store trait, its error type, and the in-memory store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot key is not usable: {0}")]
    InvalidKey(String),

    #[error("snapshot io failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value blob store behind the warehouse snapshots.
pub trait SnapshotStore {
    /// `Ok(None)` when nothing was ever saved under `key`.
    fn load_snapshot(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn save_snapshot(&self, key: &str, blob: &str) -> Result<(), PersistenceError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load_snapshot(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).load_snapshot(key)
    }

    fn save_snapshot(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        (**self).save_snapshot(key, blob)
    }
}

/// In-memory snapshot store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, bypassing serialization (e.g. to plant a corrupt one).
    pub fn with_blob(self, key: &str, blob: &str) -> Self {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), blob.to_string());
        }
        self
    }

    pub fn keys(&self) -> Vec<String> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load_snapshot(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let map = self
            .inner
            .read()
            .map_err(|_| PersistenceError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn save_snapshot(&self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| PersistenceError::Unavailable("lock poisoned".to_string()))?;
        map.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_as_none() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load_snapshot("stockroom.catalog").unwrap().is_none());
    }

    #[test]
    fn save_overwrites_previous_blob() {
        let store = Arc::new(InMemorySnapshotStore::new());
        store.save_snapshot("k", "[1]").unwrap();
        store.save_snapshot("k", "[2]").unwrap();
        assert_eq!(store.load_snapshot("k").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn poisoned_lock_is_reported_not_swallowed() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.write().unwrap();
            panic!("writer died");
        })
        .join();

        assert!(matches!(
            store.save_snapshot("k", "[]"),
            Err(PersistenceError::Unavailable(_))
        ));
        assert!(matches!(
            store.load_snapshot("k"),
            Err(PersistenceError::Unavailable(_))
        ));
    }
}
