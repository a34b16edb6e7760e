//! InMemoryStorage - HashMap-backed slot storage for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{StorageBackend, StorageError};

/// In-memory storage backed by a HashMap. Clone-friendly via Arc: clones
/// share the same slots.
#[derive(Clone)]
pub struct InMemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;

        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
