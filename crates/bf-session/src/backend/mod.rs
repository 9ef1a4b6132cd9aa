pub(crate) mod auth_backend;
pub(crate) mod fixture;
pub(crate) mod remote;

pub use auth_backend::AuthBackend;
pub use fixture::{FixtureAccount, FixtureBackend};
pub use remote::{RemoteBackend, TOKEN_KEY};

use crate::SessionResult;
use crate::cache::KeyValueStore;

use std::sync::Arc;
use std::time::Duration;

use bf_config::{BackendKind, Config};
use log::info;

/// Pick the backend implementation once, at construction time.
///
/// The remote backend persists its access token in `store`.
pub fn build_backend(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
) -> SessionResult<Arc<dyn AuthBackend>> {
    match config.remote.backend {
        BackendKind::Remote => {
            let url = config.remote.url.as_deref().unwrap_or_default();
            let anon_key = config.remote.anon_key.as_deref().unwrap_or_default();
            info!("Using remote session backend at {url}");
            let backend = RemoteBackend::new(
                url,
                anon_key,
                Duration::from_secs(config.remote.request_timeout_secs),
            )?
            .with_token_store(store);
            Ok(Arc::new(backend))
        }
        BackendKind::Fixture => {
            info!("Using fixture session backend (demo accounts)");
            Ok(Arc::new(FixtureBackend::demo()))
        }
    }
}
