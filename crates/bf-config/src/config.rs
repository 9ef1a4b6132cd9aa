use crate::{
    BackendKind, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, CacheConfig, ConfigError,
    ConfigErrorResult, LoggingConfig, ProfileRetryConfig, RemoteConfig, RetryConfig,
    SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub session: SessionConfig,
    pub retry: RetryConfig,
    pub profile_retry: ProfileRetryConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for BF_CONFIG_DIR env var, else use ./.breakfree/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply BF_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: BF_CONFIG_DIR env var > ./.breakfree/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.remote.validate()?;
        self.session.validate()?;
        self.retry.validate()?;
        self.profile_retry.validate()?;
        self.cache.validate()?;

        Ok(())
    }

    /// Absolute path of the session mirror file.
    pub fn cache_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.cache.file))
    }

    /// Log configuration summary (never logs the API key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");

        match self.remote.backend {
            BackendKind::Remote => info!(
                "  remote: {} (timeout {}s, key {})",
                self.remote.url.as_deref().unwrap_or("<unset>"),
                self.remote.request_timeout_secs,
                if self.remote.anon_key.is_some() {
                    "set"
                } else {
                    "missing"
                }
            ),
            BackendKind::Fixture => info!("  remote: fixture backend (no network)"),
        }

        info!(
            "  session: get/sign-in={}s, profile={}s, sign-out={}s",
            self.session.session_timeout_secs,
            self.session.profile_timeout_secs,
            self.session.sign_out_timeout_secs
        );

        info!(
            "  retry: retries={}, initial={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_retries,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );

        info!(
            "  profile_retry: retries={}, delay={}ms",
            self.profile_retry.max_retries, self.profile_retry.delay_ms
        );

        info!("  cache: {}", self.cache.file);

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Remote
        Self::apply_env_parse("BF_REMOTE_BACKEND", &mut self.remote.backend);
        Self::apply_env_option_string("BF_REMOTE_URL", &mut self.remote.url);
        Self::apply_env_option_string("BF_REMOTE_ANON_KEY", &mut self.remote.anon_key);
        Self::apply_env_parse(
            "BF_REMOTE_REQUEST_TIMEOUT_SECS",
            &mut self.remote.request_timeout_secs,
        );

        // Session
        Self::apply_env_parse(
            "BF_SESSION_TIMEOUT_SECS",
            &mut self.session.session_timeout_secs,
        );
        Self::apply_env_parse(
            "BF_PROFILE_TIMEOUT_SECS",
            &mut self.session.profile_timeout_secs,
        );
        Self::apply_env_parse(
            "BF_SIGN_OUT_TIMEOUT_SECS",
            &mut self.session.sign_out_timeout_secs,
        );

        // Retry
        Self::apply_env_parse("BF_RETRY_MAX_RETRIES", &mut self.retry.max_retries);
        Self::apply_env_parse(
            "BF_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("BF_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "BF_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("BF_RETRY_JITTER", &mut self.retry.jitter);

        // Profile retry
        Self::apply_env_parse(
            "BF_PROFILE_RETRY_MAX_RETRIES",
            &mut self.profile_retry.max_retries,
        );
        Self::apply_env_parse(
            "BF_PROFILE_RETRY_DELAY_MS",
            &mut self.profile_retry.delay_ms,
        );

        // Cache
        Self::apply_env_string("BF_CACHE_FILE", &mut self.cache.file);

        // Logging
        Self::apply_env_parse("BF_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BF_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BF_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
