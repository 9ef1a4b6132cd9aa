use crate::{Identity, Profile, SessionResult};

use async_trait::async_trait;
use uuid::Uuid;

/// The remote auth/profile service as the bootstrapper sees it.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The currently signed-in principal, or None without a session.
    async fn get_session(&self) -> SessionResult<Option<Identity>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> SessionResult<Identity>;

    async fn sign_out(&self) -> SessionResult<()>;

    async fn get_profile(&self, id: Uuid) -> SessionResult<Profile>;
}
