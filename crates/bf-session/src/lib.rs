//! Session bootstrap for the BreakFree CMS.
//!
//! Resolves the current identity and profile on start (local cache, then
//! remote session, then remote profile) with bounded retries and timeouts,
//! and owns sign-in / sign-out for the rest of the process.

pub mod backend;
pub mod bootstrapper;
pub mod cache;
pub mod credentials;
pub mod error;
pub mod generation;
pub mod identity;
pub mod profile;
pub mod retry;
pub mod role;
pub mod session_handle;
pub mod session_state;
pub mod settings;

pub use backend::{AuthBackend, FixtureAccount, FixtureBackend, RemoteBackend, build_backend};
pub use bootstrapper::{BootstrapOutcome, SessionBootstrapper};
pub use cache::{FileStore, KeyValueStore, MemoryStore, SessionCache};
pub use credentials::Credentials;
pub use error::{AuthFailure, Result as SessionResult, SessionError};
pub use identity::Identity;
pub use profile::Profile;
pub use retry::{Backoff, RetryPolicy, with_retry};
pub use role::Role;
pub use session_handle::SessionHandle;
pub use session_state::{AuthStatus, SessionState};
pub use settings::SessionSettings;

#[cfg(test)]
mod tests;
