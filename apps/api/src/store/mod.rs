// Local persistence: a string-keyed key-value store (the local-storage analog)
// and the two collections Hireswipe keeps in it.

pub mod file;
pub mod memory;
pub mod persistence;

use thiserror::Error;

pub use file::FileKeyValueStore;
#[cfg(test)]
pub use memory::FaultyKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use persistence::PersistenceStore;

/// Key of the decision log collection.
pub const DECISIONS_KEY: &str = "cardLogs";
/// Key of the summarized-card collection.
pub const CARDS_KEY: &str = "summarized";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Synchronous string-keyed storage. A missing key reads as `None`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the whole value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
