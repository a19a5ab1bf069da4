//! Persistent key-value store for the session.
//!
//! The desktop build keeps a flat JSON object in `<config dir>/roster/storage.json`; tests and
//! headless runs use [`MemoryStore`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use log::{debug, warn};
use thiserror::Error;

pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER: &str = "user";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_poisoned| StorageError::Poisoned)?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_poisoned| StorageError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

/// JSON file backed store. The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// `<platform config dir>/roster/storage.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "roster").map(|dirs| dirs.config_dir().join("storage.json"))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| StorageError::Json {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Apply `f` to a copy and only keep it once it reached the disk.
    fn modify(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_poisoned| StorageError::Poisoned)?;
        let mut next = entries.clone();
        f(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => {
                warn!("Store lock poisoned while reading {key}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(keys::ACCESS_TOKEN), None);

        store.set(keys::ACCESS_TOKEN, "tok").expect("set");
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("tok"));

        store.remove(keys::ACCESS_TOKEN).expect("remove");
        assert_eq!(store.get(keys::ACCESS_TOKEN), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).expect("open empty");
        store.set(keys::ACCESS_TOKEN, "a1").expect("set access");
        store.set(keys::REFRESH_TOKEN, "r1").expect("set refresh");
        store.remove(keys::REFRESH_TOKEN).expect("remove refresh");

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).as_deref(), Some("a1"));
        assert_eq!(reopened.get(keys::REFRESH_TOKEN), None);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").expect("write");

        let err = FileStore::open(&path).expect_err("corrupt file");
        assert!(matches!(err, StorageError::Json { .. }));
    }

    #[test]
    fn file_store_treats_empty_file_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        fs::write(&path, "").expect("write");

        let store = FileStore::open(&path).expect("empty file");
        assert_eq!(store.get(keys::USER), None);
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path).expect("open empty");
        store.set(keys::ACCESS_TOKEN, "a1").expect("set access");

        // A directory in place of the file makes every write fail.
        fs::remove_file(&path).expect("remove file");
        fs::create_dir(&path).expect("create dir");

        let err = store.set(keys::ACCESS_TOKEN, "a2").expect_err("write into a directory");
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("a1"));

        store.remove(keys::ACCESS_TOKEN).expect_err("remove also fails");
        assert_eq!(store.get(keys::ACCESS_TOKEN).as_deref(), Some("a1"));
    }
}
