use crate::{Identity, Profile};

use serde::Serialize;

/// Terminal authentication states of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Identity and Profile both set
    Authenticated,
    /// Identity set, Profile unavailable after a transient failure
    DegradedAuthenticated,
    /// Neither set
    Unauthenticated,
}

/// The single identity/profile slot plus a loading flag.
///
/// Only the bootstrapper mutates it; the transition methods keep a profile
/// from ever being held without its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    identity: Option<Identity>,
    profile: Option<Profile>,
    loading: bool,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> AuthStatus {
        match (&self.identity, &self.profile) {
            (Some(_), Some(_)) => AuthStatus::Authenticated,
            (Some(_), None) => AuthStatus::DegradedAuthenticated,
            _ => AuthStatus::Unauthenticated,
        }
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn adopt(&mut self, identity: Identity, profile: Profile) {
        self.identity = Some(identity);
        self.profile = Some(profile);
    }

    /// Keep the identity, drop any profile.
    pub(crate) fn degrade(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.profile = None;
    }

    pub(crate) fn clear(&mut self) {
        self.identity = None;
        self.profile = None;
    }
}
