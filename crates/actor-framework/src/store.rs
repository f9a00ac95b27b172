//! # Key-Value Stores
//!
//! Durable backing for journaled actors. A store maps a namespace to one opaque
//! JSON document; there are no transactions and the last write wins.
//!
//! - [`MemoryStore`]: process-local map, handy for tests and throwaway sessions.
//! - [`FileStore`]: one `<namespace>.json` file per namespace inside a directory.
//!   Documents are synced to disk, then swapped in with a rename, so neither a
//!   crash nor a power loss leaves a torn document behind.
//!
//! Calls are synchronous. Documents are small and the actors that write them
//! already serialize access, so blocking briefly inside an actor task is fine.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store lock poisoned: {0}")]
    Poisoned(String),
    /// The backend refused the write (quota, read-only medium, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Namespaced JSON document storage.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Returns the document stored under `namespace`, if any.
    fn get(&self, namespace: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the document stored under `namespace`.
    fn set(&self, namespace: &str, value: Value) -> Result<(), StoreError>;

    /// Drops the document stored under `namespace`. Removing a missing
    /// namespace is not an error.
    fn remove(&self, namespace: &str) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>, StoreError> {
        self.documents
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.lock()?.get(namespace).cloned())
    }

    fn set(&self, namespace: &str, value: Value) -> Result<(), StoreError> {
        self.lock()?.insert(namespace.to_string(), value);
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<(), StoreError> {
        self.lock()?.remove(namespace);
        Ok(())
    }
}

/// Directory-backed [`KeyValueStore`], one JSON file per namespace.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "File store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{namespace}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        match fs::read(self.path_for(namespace)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, namespace: &str, value: Value) -> Result<(), StoreError> {
        let path = self.path_for(namespace);
        let staging = path.with_extension("json.tmp");
        let mut file = File::create(&staging)?;
        file.write_all(&serde_json::to_vec_pretty(&value)?)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(namespace)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
