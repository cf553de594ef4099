use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// In-process store, used by tests and as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Memory store that fails reads or writes of chosen keys on demand.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FaultyKeyValueStore {
    inner: MemoryKeyValueStore,
    failing_gets: Mutex<Vec<String>>,
    failing_sets: Mutex<Vec<String>>,
}

#[cfg(test)]
impl FaultyKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_get(&self, key: &str) {
        self.failing_gets.lock().unwrap().push(key.to_string());
    }

    pub fn fail_set(&self, key: &str) {
        self.failing_sets.lock().unwrap().push(key.to_string());
    }

    pub fn heal(&self) {
        self.failing_gets.lock().unwrap().clear();
        self.failing_sets.lock().unwrap().clear();
    }

    fn injected(list: &Mutex<Vec<String>>, key: &str) -> Result<(), StoreError> {
        if list.lock().unwrap().iter().any(|k| k == key) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("injected failure on '{key}'"),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
impl KeyValueStore for FaultyKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::injected(&self.failing_gets, key)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::injected(&self.failing_sets, key)?;
        self.inner.set(key, value)
    }
}
