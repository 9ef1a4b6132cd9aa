use crate::cache::{CacheResult, KeyValueStore};
use crate::{Identity, Profile};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const IDENTITY_KEY: &str = "breakfree.identity";
pub const PROFILE_KEY: &str = "breakfree.profile";

/// A mirrored value plus the time it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    pub value: T,
    pub cached_at: DateTime<Utc>,
}

/// Best-effort mirror of the current identity and profile.
///
/// Entries may be stale; they only let a restart skip the remote round-trip.
#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn KeyValueStore>,
}

impl SessionCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// The cached pair, if both halves are present and belong together.
    pub fn load(&self) -> Option<(Identity, Profile)> {
        let identity = self.read::<Identity>(IDENTITY_KEY)?;
        let profile = self.read::<Profile>(PROFILE_KEY)?;

        if !profile.value.belongs_to(identity.value.id) {
            warn!(
                "Cached profile {} does not match cached identity {}, ignoring cache",
                profile.value.id, identity.value.id
            );
            return None;
        }

        debug!(
            "Session cache hit for {} (cached at {})",
            identity.value.id, identity.cached_at
        );
        Some((identity.value, profile.value))
    }

    pub fn save_pair(&self, identity: &Identity, profile: &Profile) -> CacheResult<()> {
        self.write(IDENTITY_KEY, identity)?;
        self.write(PROFILE_KEY, profile)
    }

    /// Mirror a degraded session: identity only.
    pub fn save_identity_only(&self, identity: &Identity) -> CacheResult<()> {
        self.store.remove(PROFILE_KEY)?;
        self.write(IDENTITY_KEY, identity)
    }

    /// Drop the mirrored identity and profile. Other keys in the store
    /// (the backend's access token) are left alone.
    pub fn clear(&self) -> CacheResult<()> {
        self.store.remove(IDENTITY_KEY)?;
        self.store.remove(PROFILE_KEY)
    }

    /// Wipe the whole store. Only sign-out does this.
    pub fn wipe(&self) -> CacheResult<()> {
        self.store.clear()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedEntry<T>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read {key} from session cache: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Discarding unreadable {key} cache entry: {e}");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> CacheResult<()> {
        let entry = CachedEntry {
            value,
            cached_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry)?;
        self.store.set(key, &json)
    }
}
