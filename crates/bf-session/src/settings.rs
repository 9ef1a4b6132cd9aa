use crate::{Backoff, RetryPolicy};

use std::time::Duration;

use bf_config::Config;

/// Timeouts and retry policies used by the bootstrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Applied to "get session" and "sign in with password"
    pub session_retry: RetryPolicy,
    /// Applied to "get profile by id"
    pub profile_retry: RetryPolicy,
    /// Bound on the remote sign-out call
    pub sign_out_timeout: Duration,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            session_retry: RetryPolicy {
                max_retries: config.retry.max_retries,
                timeout: Duration::from_secs(config.session.session_timeout_secs),
                backoff: Backoff::Exponential {
                    initial: Duration::from_millis(config.retry.initial_delay_ms),
                    multiplier: config.retry.backoff_multiplier,
                    max: Duration::from_secs(config.retry.max_delay_secs),
                },
                jitter: config.retry.jitter,
            },
            profile_retry: RetryPolicy {
                max_retries: config.profile_retry.max_retries,
                timeout: Duration::from_secs(config.session.profile_timeout_secs),
                backoff: Backoff::Fixed(Duration::from_millis(config.profile_retry.delay_ms)),
                jitter: false,
            },
            sign_out_timeout: Duration::from_secs(config.session.sign_out_timeout_secs),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
