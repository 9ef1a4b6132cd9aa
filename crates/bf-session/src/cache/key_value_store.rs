use crate::cache::CacheResult;

/// String-keyed durable storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    fn remove(&self, key: &str) -> CacheResult<()>;

    /// Remove every key.
    fn clear(&self) -> CacheResult<()>;
}
