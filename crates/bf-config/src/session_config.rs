use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Session call bounds
pub const MIN_SESSION_TIMEOUT_SECS: u64 = 1;
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 15;

pub const MIN_PROFILE_TIMEOUT_SECS: u64 = 1;
pub const MAX_PROFILE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PROFILE_TIMEOUT_SECS: u64 = 15;

pub const MIN_SIGN_OUT_TIMEOUT_SECS: u64 = 1;
pub const MAX_SIGN_OUT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SIGN_OUT_TIMEOUT_SECS: u64 = 5;

/// Per-call timeouts for the remote session operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bound on "get session" and "sign in with password"
    pub session_timeout_secs: u64,
    /// Bound on "get profile by id"
    pub profile_timeout_secs: u64,
    /// Bound on the remote sign-out call
    pub sign_out_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            profile_timeout_secs: DEFAULT_PROFILE_TIMEOUT_SECS,
            sign_out_timeout_secs: DEFAULT_SIGN_OUT_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.session_timeout_secs < MIN_SESSION_TIMEOUT_SECS
            || self.session_timeout_secs > MAX_SESSION_TIMEOUT_SECS
        {
            return Err(ConfigError::config(format!(
                "session.session_timeout_secs must be {}-{}, got {}",
                MIN_SESSION_TIMEOUT_SECS, MAX_SESSION_TIMEOUT_SECS, self.session_timeout_secs
            )));
        }

        if self.profile_timeout_secs < MIN_PROFILE_TIMEOUT_SECS
            || self.profile_timeout_secs > MAX_PROFILE_TIMEOUT_SECS
        {
            return Err(ConfigError::config(format!(
                "session.profile_timeout_secs must be {}-{}, got {}",
                MIN_PROFILE_TIMEOUT_SECS, MAX_PROFILE_TIMEOUT_SECS, self.profile_timeout_secs
            )));
        }

        if self.sign_out_timeout_secs < MIN_SIGN_OUT_TIMEOUT_SECS
            || self.sign_out_timeout_secs > MAX_SIGN_OUT_TIMEOUT_SECS
        {
            return Err(ConfigError::config(format!(
                "session.sign_out_timeout_secs must be {}-{}, got {}",
                MIN_SIGN_OUT_TIMEOUT_SECS, MAX_SIGN_OUT_TIMEOUT_SECS, self.sign_out_timeout_secs
            )));
        }

        Ok(())
    }
}
