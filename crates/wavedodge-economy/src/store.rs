//! Profile persistence behind a key/value trait.
//!
//! Stores hold serialized profiles keyed by a short name (a user id or a
//! slot name). The simulation never waits on a store.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::info;

use crate::error::StoreError;
use crate::profile::PlayerProfile;

pub trait ProfileStore: Send + Sync {
    fn save(&self, key: &str, profile: &PlayerProfile) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<PlayerProfile>, StoreError>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    fn load_or_default(&self, key: &str) -> Result<PlayerProfile, StoreError> {
        Ok(self.load(key)?.unwrap_or_default())
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One pretty-printed JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProfileStore for JsonFileStore {
    fn save(&self, key: &str, profile: &PlayerProfile) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.path_for(key), json)?;
        info!(key, coins = profile.coins, "profile saved");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<PlayerProfile>, StoreError> {
        validate_key(key)?;
        let json = match fs::read_to_string(self.path_for(key)) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut keys: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// In-process store holding serialized profiles. Stands in for a remote
/// key/value backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProfileStore for MemoryStore {
    fn save(&self, key: &str, profile: &PlayerProfile) -> Result<(), StoreError> {
        validate_key(key)?;
        let json = serde_json::to_string(profile)?;
        self.entries().insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<PlayerProfile>, StoreError> {
        validate_key(key)?;
        self.entries()
            .get(key)
            .map(|json| serde_json::from_str(json))
            .transpose()
            .map_err(StoreError::from)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
