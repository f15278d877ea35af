//! Local key-value storage for persisted editor data.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string-keyed store of string values, in the manner of `localStorage`.
pub trait Storage {
    /// Write a value, replacing any previous one.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read a value.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove a value. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read a value, mapping a missing key to `None`.
    fn load_optional(&self, key: &str) -> StorageResult<Option<String>> {
        match self.load(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
