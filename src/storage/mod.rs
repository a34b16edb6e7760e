//! Storage - the key-value slot behind the record store.
//!
//! The store serializes its whole record list into a single slot, so the
//! backend surface is one string value per key. `InMemoryStorage` covers
//! tests and throwaway sessions; `FileStorage` maps each key to a file on
//! disk.

mod file;
mod in_memory;

use std::fmt;

/// One string slot per key.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`. Returns None if the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Error type for storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    LockPoisoned(&'static str),
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::Io(msg) => write!(f, "storage i/o error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
