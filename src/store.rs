//! ChamadoStore - the authoritative ordered record list and its persistence
//! binding.
//!
//! The head of the list is the most recent entry. Every mutating operation
//! serializes the full list into the backing slot before the in-memory list
//! is swapped, so a successful call always leaves blob and memory in
//! agreement, and a failed write leaves both untouched.

use std::fmt;

use crate::chamado::Chamado;
use crate::storage::{StorageBackend, StorageError};

/// Slot key holding the serialized record list.
pub const STORAGE_KEY: &str = "chamados";

/// Error type for store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend read or write failure.
    Storage(StorageError),
    /// Record serialization failure.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Storage(e) => write!(f, "store storage error: {}", e),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

/// Ordered record store over a key-value slot.
pub struct ChamadoStore<S: StorageBackend> {
    records: Vec<Chamado>,
    backend: S,
    key: String,
}

impl<S: StorageBackend> ChamadoStore<S> {
    /// Load the store from `backend` under the default slot key.
    ///
    /// A missing slot yields an empty store. A blob that is present but
    /// malformed is logged and reset to an empty store; load never fails.
    pub fn load(backend: S) -> Self {
        Self::load_from(backend, STORAGE_KEY)
    }

    /// Load the store from a specific slot key.
    pub fn load_from(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = match backend.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "malformed record blob, resetting to empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "storage read failed, starting empty");
                Vec::new()
            }
        };

        Self {
            records,
            backend,
            key,
        }
    }

    /// The current ordered record list, head first.
    pub fn records(&self) -> &[Chamado] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by id.
    pub fn find(&self, id: &str) -> Option<&Chamado> {
        self.records.iter().find(|c| c.id == id)
    }

    /// Insert `record` at the head of the order.
    pub fn add(&mut self, record: Chamado) -> Result<(), StoreError> {
        let mut next = self.records.clone();
        next.insert(0, record);
        self.commit(next)
    }

    /// Replace the record matching `id` in place, position preserved. When
    /// the id is absent no record is added; the unchanged list is still
    /// written through.
    pub fn update(&mut self, id: &str, record: Chamado) -> Result<(), StoreError> {
        let mut next = self.records.clone();
        if let Some(slot) = next.iter_mut().find(|c| c.id == id) {
            *slot = record;
        }
        self.commit(next)
    }

    /// Delete the record matching `id`. Absent ids are a no-op; removing the
    /// same id twice is safe.
    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let mut next = self.records.clone();
        next.retain(|c| c.id != id);
        self.commit(next)
    }

    /// Prepend `records` as a block ahead of all existing records, keeping
    /// the given sequence order. Callers wanting a different final order
    /// pre-arrange the batch (see `merge_batch`).
    pub fn import_batch(&mut self, records: Vec<Chamado>) -> Result<(), StoreError> {
        let mut next = records;
        next.extend(self.records.iter().cloned());
        self.commit(next)
    }

    /// Serialize `next` into the slot, then make it the in-memory list.
    fn commit(&mut self, next: Vec<Chamado>) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&next).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.backend.write(&self.key, &blob)?;
        self.records = next;
        Ok(())
    }
}
