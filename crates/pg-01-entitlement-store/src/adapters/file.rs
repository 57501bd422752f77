use crate::errors::StoreError;
use crate::ports::KeyValueStore;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{info, warn};

/// File-backed implementation of `KeyValueStore`.
///
/// Persists the key space as a single JSON object on disk. Every write
/// rewrites the file through a temp-file rename, so a crash mid-write leaves
/// the previous file intact rather than a torn one. Note this makes each
/// individual `put`/`delete` atomic; atomicity across separate calls is NOT
/// provided (see crate docs).
pub struct FileBackedKVStore {
    data: RwLock<HashMap<String, String>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Create a store backed by `path`, loading existing contents if any.
    ///
    /// A missing or unreadable file starts the store empty; corruption is
    /// logged, never fatal.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&path).unwrap_or_default();

        if data.is_empty() {
            info!(path = %path.display(), "Entitlement file empty or not found");
        } else {
            info!(
                path = %path.display(),
                keys = data.len(),
                "Loaded entitlement records"
            );
        }

        Self {
            data: RwLock::new(data),
            path,
        }
    }

    fn load_from_file(path: &Path) -> Option<HashMap<String, String>> {
        let bytes = std::fs::read(path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Entitlement file corrupt, starting empty"
                );
                None
            }
        }
    }

    fn save(&self, data: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: e.to_string(),
            })?;
        }

        let bytes = serde_json::to_vec_pretty(data).map_err(|e| StoreError::Serialization {
            key: "*".to_string(),
            message: e.to_string(),
        })?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(key.to_string(), value.to_string());
        self.save(&data)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.remove(key);
        self.save(&data)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.contains_key(key))
    }
}
