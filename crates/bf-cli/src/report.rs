use bf_session::{AuthStatus, BootstrapOutcome, Identity, Profile, SessionState};

use serde::Serialize;

/// JSON document printed on stdout after every command.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub status: AuthStatus,
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    /// Set when a newer operation replaced this one
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub superseded: bool,
}

impl SessionReport {
    pub fn new(state: &SessionState) -> Self {
        Self {
            status: state.status(),
            identity: state.identity().cloned(),
            profile: state.profile().cloned(),
            superseded: false,
        }
    }

    pub fn with_outcome(mut self, outcome: BootstrapOutcome) -> Self {
        self.superseded = matches!(outcome, BootstrapOutcome::Superseded);
        self
    }

    pub fn render(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
