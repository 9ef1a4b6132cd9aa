mod backend_kind;
mod cache_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod profile_retry_config;
mod remote_config;
mod retry_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use backend_kind::BackendKind;
pub use cache_config::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use profile_retry_config::ProfileRetryConfig;
pub use remote_config::RemoteConfig;
pub use retry_config::RetryConfig;
pub use session_config::SessionConfig;

pub const CONFIG_DIR_ENV: &str = "BF_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".breakfree";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_CACHE_FILE: &str = "session.json";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
