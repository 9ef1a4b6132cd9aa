use crate::cache::{CacheError, CacheResult, KeyValueStore};

use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::poisoned())?;
        entries.clear();
        Ok(())
    }
}
