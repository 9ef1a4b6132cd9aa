use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MAX_PROFILE_RETRIES: u32 = 10;
pub const DEFAULT_PROFILE_RETRIES: u32 = 2;

pub const MIN_PROFILE_DELAY_MS: u64 = 10;
pub const MAX_PROFILE_DELAY_MS: u64 = 60000;
pub const DEFAULT_PROFILE_DELAY_MS: u64 = 3000;

/// Fixed-delay retry for profile fetches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileRetryConfig {
    pub max_retries: u32,
    pub delay_ms: u64,
}

impl Default for ProfileRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_PROFILE_RETRIES,
            delay_ms: DEFAULT_PROFILE_DELAY_MS,
        }
    }
}

impl ProfileRetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_retries > MAX_PROFILE_RETRIES {
            return Err(ConfigError::config(format!(
                "profile_retry.max_retries must be 0-{}, got {}",
                MAX_PROFILE_RETRIES, self.max_retries
            )));
        }

        if self.delay_ms < MIN_PROFILE_DELAY_MS || self.delay_ms > MAX_PROFILE_DELAY_MS {
            return Err(ConfigError::config(format!(
                "profile_retry.delay_ms must be {}-{}, got {}",
                MIN_PROFILE_DELAY_MS, MAX_PROFILE_DELAY_MS, self.delay_ms
            )));
        }

        Ok(())
    }
}
