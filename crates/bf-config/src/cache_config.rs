use crate::{ConfigError, ConfigErrorResult, DEFAULT_CACHE_FILE};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Session mirror file, relative to the config directory
    pub file: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_CACHE_FILE),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::cache("cache.file cannot be empty"));
        }

        if Path::new(&self.file).is_absolute() || self.file.contains("..") {
            return Err(ConfigError::cache(
                "cache.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
