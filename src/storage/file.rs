//! FileStorage - one file per key under a base directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{StorageBackend, StorageError};

/// File-backed storage: each key maps to `<base>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    /// Open a storage directory, creating it if needed.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base = base.into();
        fs::create_dir_all(&base).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { base })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.slot_path(key), value).map_err(|e| StorageError::Io(e.to_string()))
    }
}
