// SPDX-License-Identifier: Apache-2.0

//! Key-value backends for the workflow store.
//!
//! [`FileStore`] keeps every key in one JSON object on disk, written with the
//! temp-file-then-rename pattern. [`MemoryStore`] backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::Result;
use crate::error::ForkError;

/// String-to-string storage, the shape of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `ForkError::Storage` when the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>>;
}

fn storage_error(message: impl Into<String>) -> ForkError {
    ForkError::Storage {
        message: message.into(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| storage_error("store lock poisoned"))
}

/// JSON file holding a flat object of string values.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Opens (lazily) the store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            storage_error(format!(
                "Failed to read store file {}: {e}",
                self.path.display()
            ))
        })?;
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupt, starting empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                storage_error(format!(
                    "Failed to create store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| storage_error(format!("Failed to serialize store: {e}")))?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| {
            storage_error(format!(
                "Failed to write store temp file {}: {e}",
                temp_path.display()
            ))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            storage_error(format!(
                "Failed to rename store file {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), keys = map.len(), "Store saved");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = lock(&self.guard)?;
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = lock(&self.guard)?;
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.into_keys().collect())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.keys().unwrap(), vec!["b".to_string()]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.keys().unwrap().is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_store_basics() {
        let store = MemoryStore::new();
        assert_eq!(store.get("x").unwrap(), None);
        store.set("x", "1").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["x".to_string()]);
    }
}
