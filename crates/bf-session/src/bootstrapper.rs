use crate::backend::AuthBackend;
use crate::cache::{CacheResult, SessionCache};
use crate::generation::{AttemptGenerations, Generation};
use crate::{
    AuthFailure, AuthStatus, Credentials, Identity, Profile, SessionError, SessionHandle,
    SessionResult, SessionSettings, SessionState, with_retry,
};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::time::timeout;

/// How a passive bootstrap or profile refresh ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Completed(AuthStatus),
    /// A newer sign-in/sign-out took over; nothing was written
    Superseded,
}

/// What a commit does to the slot and its cache mirror.
enum Transition {
    Adopt(Identity, Profile),
    /// Identity known, profile still being fetched
    Restore(Identity),
    Degrade(Identity),
    /// Drop the slot and the mirrored pair
    Clear,
}

/// Single writer of the session slot.
///
/// Every mutating operation takes a fresh [`Generation`]; a result is only
/// written if its generation is still the latest, so a slow bootstrap retry
/// can never overwrite a newer sign-in or sign-out.
pub struct SessionBootstrapper {
    backend: Arc<dyn AuthBackend>,
    cache: SessionCache,
    settings: SessionSettings,
    generations: AttemptGenerations,
    state: watch::Sender<SessionState>,
}

impl SessionBootstrapper {
    pub fn new(backend: Arc<dyn AuthBackend>, cache: SessionCache, settings: SessionSettings) -> Self {
        let (state, _) = watch::channel(SessionState::default());

        Self {
            backend,
            cache,
            settings,
            generations: AttemptGenerations::default(),
            state,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.state.subscribe())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Resolve the initial session: cache, then remote session, then profile.
    ///
    /// Never fails; remote errors end in a terminal state and are logged.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        let generation = self.begin();

        if let Some((identity, profile)) = self.cache.load() {
            info!("Restored session for {} from cache", identity.email);
            return self.complete(generation, Transition::Adopt(identity, profile));
        }

        let backend = Arc::clone(&self.backend);
        let session = with_retry(&self.settings.session_retry, "get_session", || {
            let backend = Arc::clone(&backend);
            async move { backend.get_session().await }
        })
        .await;

        let identity = match session {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                info!("No remote session");
                return self.complete(generation, Transition::Clear);
            }
            Err(e) => {
                warn!("Session restore failed, continuing signed out: {e}");
                return self.complete(generation, Transition::Clear);
            }
        };

        if !self.commit(generation, Transition::Restore(identity.clone()), true) {
            debug!("Bootstrap superseded after session restore");
            return BootstrapOutcome::Superseded;
        }

        self.resolve_profile(generation, identity).await
    }

    /// Sign in and load the profile. Either both succeed or nothing is kept.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<()> {
        let credentials = Credentials::parse(email, password)?;
        let generation = self.begin();

        let backend = Arc::clone(&self.backend);
        let signed_in = with_retry(&self.settings.session_retry, "sign_in", || {
            let backend = Arc::clone(&backend);
            let credentials = credentials.clone();
            async move {
                backend
                    .sign_in_with_password(&credentials.email, &credentials.password)
                    .await
            }
        })
        .await;

        let identity = match signed_in {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Sign-in failed for {}: {e}", credentials.email);
                self.complete(generation, Transition::Clear);
                return Err(e);
            }
        };

        match self.fetch_profile(&identity).await {
            Ok(profile) => {
                if !self.commit(generation, Transition::Adopt(identity.clone(), profile), false) {
                    return Err(SessionError::superseded());
                }
                info!("Signed in as {}", identity.email);
                Ok(())
            }
            Err(e) => {
                // A newer operation owns the backend session now
                if !self.generations.is_current(generation) {
                    debug!("Stale sign-in for {} failed, leaving backend alone", identity.email);
                    return Err(SessionError::superseded());
                }

                warn!(
                    "Profile unavailable for {}, rolling back sign-in: {e}",
                    identity.email
                );
                self.remote_sign_out().await;
                self.complete(generation, Transition::Clear);
                Err(e)
            }
        }
    }

    /// Clear local state, then sign out remotely within the configured bound
    /// and wipe the store.
    pub async fn sign_out(&self) {
        let generation = self.begin();

        // Local clearing never waits on the remote call
        self.commit(generation, Transition::Clear, false);
        self.remote_sign_out().await;
        self.wipe_store(generation);

        info!("Signed out");
    }

    /// Re-fetch the profile for the current identity.
    pub async fn refresh_profile(&self) -> SessionResult<BootstrapOutcome> {
        let Some(identity) = self.state.borrow().identity().cloned() else {
            return Err(SessionError::authentication(
                AuthFailure::NotSignedIn,
                "no identity to refresh a profile for",
            ));
        };

        let generation = self.begin();
        Ok(self.resolve_profile(generation, identity).await)
    }

    /// Fetch the profile and apply the passive-path outcome rules.
    async fn resolve_profile(&self, generation: Generation, identity: Identity) -> BootstrapOutcome {
        match self.fetch_profile(&identity).await {
            Ok(profile) => self.complete(generation, Transition::Adopt(identity, profile)),
            Err(e) if e.is_transient() => {
                warn!(
                    "Profile unavailable for {}, keeping session degraded: {e}",
                    identity.email
                );
                self.complete(generation, Transition::Degrade(identity))
            }
            Err(e) => {
                warn!("Profile rejected for {}, clearing session: {e}", identity.email);
                self.complete(generation, Transition::Clear)
            }
        }
    }

    async fn fetch_profile(&self, identity: &Identity) -> SessionResult<Profile> {
        let backend = Arc::clone(&self.backend);
        let id = identity.id;

        let profile = with_retry(&self.settings.profile_retry, "get_profile", || {
            let backend = Arc::clone(&backend);
            async move { backend.get_profile(id).await }
        })
        .await?;

        if !profile.belongs_to(id) {
            return Err(SessionError::unexpected(format!(
                "profile {} returned for user {id}",
                profile.id
            )));
        }

        Ok(profile)
    }

    async fn remote_sign_out(&self) {
        let bound = self.settings.sign_out_timeout;

        match timeout(bound, self.backend.sign_out()).await {
            Ok(Ok(())) => debug!("Remote sign-out complete"),
            Ok(Err(e)) => warn!("Remote sign-out failed: {e}"),
            Err(_) => warn!("Remote sign-out timed out after {bound:?}"),
        }
    }

    /// Wipe the whole store, access token included, unless a newer
    /// operation has started since `generation`.
    fn wipe_store(&self, generation: Generation) {
        self.state.send_if_modified(|_| {
            if self.generations.is_current(generation) {
                log_cache_failure(self.cache.wipe());
            }
            false
        });
    }

    /// Start a new operation and mark the slot as loading.
    fn begin(&self) -> Generation {
        let mut generation = Generation::default();

        // Bump under the state lock so begin and commit never interleave
        self.state.send_modify(|state| {
            generation = self.generations.begin();
            state.set_loading(true);
        });

        generation
    }

    fn complete(&self, generation: Generation, transition: Transition) -> BootstrapOutcome {
        let status = match &transition {
            Transition::Adopt(..) => AuthStatus::Authenticated,
            Transition::Restore(_) | Transition::Degrade(_) => AuthStatus::DegradedAuthenticated,
            Transition::Clear => AuthStatus::Unauthenticated,
        };

        if self.commit(generation, transition, false) {
            BootstrapOutcome::Completed(status)
        } else {
            debug!("Discarding stale session result");
            BootstrapOutcome::Superseded
        }
    }

    /// Apply `transition` to the slot and its cache mirror if `generation`
    /// is still the latest. Returns false for stale results.
    fn commit(&self, generation: Generation, transition: Transition, loading: bool) -> bool {
        // Mirror writes stay under the sender's lock so they land in
        // generation order. FileStore fsyncs here and readers wait on it.
        self.state.send_if_modified(|state| {
            if !self.generations.is_current(generation) {
                return false;
            }

            let mirrored = match transition {
                Transition::Adopt(identity, profile) => {
                    let mirrored = self.cache.save_pair(&identity, &profile);
                    state.adopt(identity, profile);
                    mirrored
                }
                Transition::Restore(identity) => {
                    state.degrade(identity);
                    Ok(())
                }
                Transition::Degrade(identity) => {
                    let mirrored = self.cache.save_identity_only(&identity);
                    state.degrade(identity);
                    mirrored
                }
                Transition::Clear => {
                    state.clear();
                    self.cache.clear()
                }
            };
            log_cache_failure(mirrored);

            state.set_loading(loading);
            true
        })
    }
}

fn log_cache_failure(result: CacheResult<()>) {
    if let Err(e) = result {
        warn!("Session cache update failed: {e}");
    }
}
