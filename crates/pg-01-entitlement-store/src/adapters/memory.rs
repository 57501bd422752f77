use crate::errors::StoreError;
use crate::ports::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of `KeyValueStore`.
///
/// Used in unit tests and for ephemeral sessions that opt out of
/// persistence. Production sessions use `FileBackedKVStore`.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: RwLock<HashMap<String, String>>,
}

impl InMemoryKVStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.contains_key(key))
    }
}
