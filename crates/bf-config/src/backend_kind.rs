use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which session backend the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted auth + profile REST service
    Remote,
    /// Canned demo accounts, no network
    #[default]
    Fixture,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(BackendKind::Remote),
            "fixture" => Ok(BackendKind::Fixture),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Remote => write!(f, "remote"),
            BackendKind::Fixture => write!(f, "fixture"),
        }
    }
}
