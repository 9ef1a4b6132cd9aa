use crate::{SessionError, SessionResult};

use std::fmt;

/// Email/password pair that passed local validation.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validate before any remote call is made.
    pub fn parse(email: &str, password: &str) -> SessionResult<Self> {
        let email = email.trim();

        if email.is_empty() {
            return Err(SessionError::validation("Email is required."));
        }

        if password.is_empty() {
            return Err(SessionError::validation("Password is required."));
        }

        if !is_email_shaped(email) {
            return Err(SessionError::validation(
                "Please enter a valid email address.",
            ));
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dotted domain with non-empty labels.
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
