use crate::{BackendKind, ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Remote constraints
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted auth/profile service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub backend: BackendKind,
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Public (anon) API key sent as the `apikey` header
    pub anon_key: Option<String>,
    /// Transport-level timeout for a single HTTP request
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            url: None,
            anon_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::remote(format!(
                "remote.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        if self.backend == BackendKind::Fixture {
            return Ok(());
        }

        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ConfigError::remote("remote.url is required when backend = remote"))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::remote(format!(
                "remote.url must start with http:// or https://, got {url}"
            )));
        }

        if self
            .anon_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            return Err(ConfigError::remote(
                "remote.anon_key is required when backend = remote",
            ));
        }

        Ok(())
    }
}
