use crate::backend::AuthBackend;
use crate::{AuthFailure, Identity, Profile, Role, SessionError, SessionResult};

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;
use uuid::Uuid;

const ADMIN_ID: Uuid = Uuid::from_u128(0x0b5e_55a1_0000_4000_8000_0000_0000_0001);
const EDITOR_ID: Uuid = Uuid::from_u128(0x0b5e_55a1_0000_4000_8000_0000_0000_0002);

/// A canned account served by [`FixtureBackend`].
#[derive(Debug, Clone)]
pub struct FixtureAccount {
    pub identity: Identity,
    pub password: String,
    pub profile: Option<Profile>,
}

/// In-process backend over canned accounts. Makes no network calls.
#[derive(Debug)]
pub struct FixtureBackend {
    accounts: Vec<FixtureAccount>,
    current: Mutex<Option<Uuid>>,
}

impl FixtureBackend {
    pub fn new(accounts: Vec<FixtureAccount>) -> Self {
        Self {
            accounts,
            current: Mutex::new(None),
        }
    }

    /// Demo accounts: an admin and an ordinary editor.
    pub fn demo() -> Self {
        Self::new(vec![
            FixtureAccount {
                identity: Identity::new(ADMIN_ID, "admin@breakfree.com"),
                password: String::from("admin123"),
                profile: Some(Profile {
                    id: ADMIN_ID,
                    name: String::from("Admin User"),
                    role: Role::Admin,
                    avatar_url: None,
                }),
            },
            FixtureAccount {
                identity: Identity::new(EDITOR_ID, "editor@breakfree.com"),
                password: String::from("editor123"),
                profile: Some(Profile {
                    id: EDITOR_ID,
                    name: String::from("Content Editor"),
                    role: Role::User,
                    avatar_url: None,
                }),
            },
        ])
    }

    pub fn accounts(&self) -> &[FixtureAccount] {
        &self.accounts
    }

    fn find_by_id(&self, id: Uuid) -> Option<&FixtureAccount> {
        self.accounts.iter().find(|a| a.identity.id == id)
    }
}

#[async_trait]
impl AuthBackend for FixtureBackend {
    async fn get_session(&self) -> SessionResult<Option<Identity>> {
        let current = *self.current.lock().await;
        Ok(current
            .and_then(|id| self.find_by_id(id))
            .map(|account| account.identity.clone()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> SessionResult<Identity> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.identity.email.eq_ignore_ascii_case(email) && a.password == password)
            .ok_or_else(|| {
                SessionError::authentication(
                    AuthFailure::InvalidCredentials,
                    "Invalid login credentials",
                )
            })?;

        *self.current.lock().await = Some(account.identity.id);
        debug!("Fixture sign-in as {}", account.identity.email);
        Ok(account.identity.clone())
    }

    async fn sign_out(&self) -> SessionResult<()> {
        *self.current.lock().await = None;
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> SessionResult<Profile> {
        self.find_by_id(id)
            .and_then(|account| account.profile.clone())
            .ok_or_else(|| SessionError::not_found(format!("no profile for user {id}")))
    }
}
