//! Key-value storage backends for persisted preferences.
//!
//! The preferences layer only needs string keys mapped to string values, the same shape
//! a browser's local storage offers. Every call returns a `Result`, but callers treat
//! writes as fire-and-forget: a failing backend degrades to "nothing remembered" instead
//! of breaking the catalog.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: process-local map, useful for tests and ephemeral sessions
//! - [`FileStorage`]: a single JSON object file on disk
//! - [`DisabledStorage`]: rejects every call, models storage being switched off
//!
//! ```rust
//! use devtoolbox::storage::{KeyValueStorage, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set_item("it_tools_theme", "dark").unwrap();
//! assert_eq!(storage.get_item("it_tools_theme").unwrap(), Some("dark".to_string()));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Error types for storage access.
#[derive(Debug)]
pub enum StorageError {
    /// The backend refuses access (disabled, poisoned lock).
    Unavailable(String),
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file exists but does not hold a JSON object of strings.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Corrupt(msg) => write!(f, "Storage file corrupt: {}", msg),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// String key-value store with interior mutability.
///
/// Implementations must be usable through a shared reference so a single backend can be
/// held behind an `Arc` by both the catalog and its host.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value for `key`, `Ok(None)` if it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value for `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("storage lock poisoned".to_string())
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Storage persisted as one pretty-printed JSON object file.
///
/// Each write rewrites the whole file. A missing file reads as empty; parent
/// directories are created on the first write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Use `path` as the backing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json =
            serde_json::to_string_pretty(items).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = match self.load() {
            Ok(items) => items,
            Err(StorageError::Corrupt(msg)) => {
                log::warn!(
                    "storage: {} is corrupt ({}), starting a fresh file",
                    self.path.display(),
                    msg
                );
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        items.insert(key.to_string(), value.to_string());
        self.store(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }
}

/// A backend that fails every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStorage;

impl KeyValueStorage for DisabledStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v2".to_string()));

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let first = FileStorage::new(&path);
        assert_eq!(first.get_item("theme").unwrap(), None);
        first.set_item("theme", "light").unwrap();
        first.set_item("favorites", "[\"UUID Generator\"]").unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get_item("theme").unwrap(), Some("light".to_string()));
        assert_eq!(
            second.get_item("favorites").unwrap(),
            Some("[\"UUID Generator\"]".to_string())
        );

        second.remove_item("theme").unwrap();
        assert_eq!(first.get_item("theme").unwrap(), None);
    }

    #[test]
    fn test_file_storage_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        match storage.get_item("theme") {
            Err(StorageError::Corrupt(_)) => {}
            other => panic!("expected corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_storage_write_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "garbage").unwrap();

        let storage = FileStorage::new(&path);
        storage.set_item("theme", "light").unwrap();
        assert_eq!(storage.get_item("theme").unwrap(), Some("light".to_string()));

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("theme").unwrap(), Some("light".to_string()));
    }

    #[test]
    fn test_disabled_storage_rejects_everything() {
        let storage = DisabledStorage;
        assert!(storage.get_item("a").is_err());
        assert!(storage.set_item("a", "b").is_err());
        assert!(storage.remove_item("a").is_err());
    }
}
