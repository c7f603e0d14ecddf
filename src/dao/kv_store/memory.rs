use dashmap::DashMap;

use crate::dao::{kv_store::KeyValueStore, storage::StorageResult};

/// Volatile store used for demos and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
