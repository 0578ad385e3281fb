//! JSON-file-backed key/value local store.
//!
//! Pure mechanism: callers own the meaning of keys. Reads that find no
//! stored value, or a value that no longer deserializes, return the
//! caller-supplied default instead of failing. Writes serialize the
//! whole map to disk synchronously.
//!
//! The map sits behind a `Mutex`. Plain `get`/`set` lock per call;
//! callers that read-modify-write a key (queue append, cache upsert)
//! go through [`LocalStore::update`], which holds the lock across the
//! whole sequence so concurrent writers to one key never lose updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;

const STORE_FILE: &str = "store.json";

/// Durable string-keyed store holding JSON values.
pub struct LocalStore {
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
    path: PathBuf,
}

impl LocalStore {
    /// Open the store at the platform data directory.
    pub fn open() -> Result<Self, StoreError> {
        let dir = dirs::data_local_dir()
            .map(|p| p.join("menuplan"))
            .ok_or_else(|| {
                StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine data directory",
                ))
            })?;
        fs::create_dir_all(&dir)?;
        Ok(Self::new_with_path(dir.join(STORE_FILE)))
    }

    /// Open the store at a specific file path (used in tests).
    ///
    /// A missing or corrupt file starts the store empty; stored
    /// defaults take over on read.
    pub fn new_with_path(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "store file unreadable, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            entries: Mutex::new(entries),
            path,
        }
    }

    /// Read a value, falling back to `default` when the key is absent
    /// or the stored value does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        match entries.get(key) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or(default),
            None => default,
        }
    }

    /// Write a value and persist the store synchronously.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let serialized = serde_json::to_value(value)?;
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), serialized);
        self.persist(&entries)
    }

    /// Atomically read-modify-write one key and persist the result.
    ///
    /// The map lock is held for the whole closure, so two concurrent
    /// `update` calls on the same key always see each other's writes.
    /// A missing or undecodable value starts from `default`, matching
    /// [`LocalStore::get`]. Returns the stored value.
    pub fn update<T, F>(&self, key: &str, default: T, f: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut value: T = match entries.get(key) {
            Some(stored) => serde_json::from_value(stored.clone()).unwrap_or(default),
            None => default,
        };
        f(&mut value);
        entries.insert(key.to_string(), serde_json::to_value(&value)?);
        self.persist(&entries)?;
        Ok(value)
    }

    /// Remove a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }

    fn persist(&self, entries: &BTreeMap<String, serde_json::Value>) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
