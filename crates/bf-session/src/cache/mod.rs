pub(crate) mod error;
pub(crate) mod file_store;
pub(crate) mod key_value_store;
pub(crate) mod memory_store;
pub(crate) mod session_cache;

pub use error::{CacheError, Result as CacheResult};
pub use file_store::FileStore;
pub use key_value_store::KeyValueStore;
pub use memory_store::MemoryStore;
pub use session_cache::{CachedEntry, IDENTITY_KEY, PROFILE_KEY, SessionCache};
