//! Key-value storage for the persisted session snapshot.
//!
//! This module plays the role the browser's local storage plays for the web
//! client: a small string-to-string store that survives a reload. The session
//! store is its only writer.

pub mod file;
pub mod memory;
pub mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are not valid json: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// String key-value medium. Every call is complete when it returns.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
