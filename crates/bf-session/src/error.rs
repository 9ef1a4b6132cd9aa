use std::fmt;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why the auth service refused a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    EmailNotConfirmed,
    RateLimited,
    NotSignedIn,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AuthFailure::InvalidCredentials => "invalid credentials",
            AuthFailure::EmailNotConfirmed => "email not confirmed",
            AuthFailure::RateLimited => "rate limited",
            AuthFailure::NotSignedIn => "not signed in",
        };
        f.write_str(tag)
    }
}

/// Errors surfaced by the session core.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Connection error: {message} {location}")]
    Connection {
        message: String,
        location: ErrorLocation,
    },

    #[error("{operation} timed out after {timeout:?} {location}")]
    Timeout {
        operation: String,
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Authentication failed ({kind}): {message} {location}")]
    Authentication {
        kind: AuthFailure,
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Permission denied: {message} {location}")]
    PermissionDenied {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected error: {message} {location}")]
    Unexpected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Superseded by a newer session operation {location}")]
    Superseded { location: ErrorLocation },
}

impl SessionError {
    /// Connection and timeout failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }

    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Authentication { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Message suitable for an inline form error or a toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Connection { .. } => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            Self::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Self::Authentication { kind, .. } => match kind {
                AuthFailure::InvalidCredentials => "Invalid email or password.".to_string(),
                AuthFailure::EmailNotConfirmed => {
                    "Please confirm your email address before signing in.".to_string()
                }
                AuthFailure::RateLimited => {
                    "Too many sign-in attempts. Please wait a moment and try again.".to_string()
                }
                AuthFailure::NotSignedIn => "You are not signed in.".to_string(),
            },
            Self::NotFound { .. } => "Your user profile could not be found.".to_string(),
            Self::PermissionDenied { .. } => {
                "You do not have permission to access this account.".to_string()
            }
            Self::Unexpected { .. } => "An unexpected error occurred.".to_string(),
            Self::Superseded { .. } => {
                "Another sign-in or sign-out replaced this request.".to_string()
            }
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn authentication(kind: AuthFailure, message: impl Into<String>) -> Self {
        Self::Authentication {
            kind,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn superseded() -> Self {
        Self::Superseded {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
