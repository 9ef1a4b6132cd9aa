mod retry;
mod session_state;

use crate::{
    AuthBackend, Backoff, Identity, MemoryStore, Profile, RetryPolicy, Role, SessionCache,
    SessionError, SessionResult, SessionSettings,
};

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

pub(crate) const ALICE_ID: Uuid = Uuid::from_u128(0xa11c_e000_0000_4000_8000_0000_0000_0001);
pub(crate) const BOB_ID: Uuid = Uuid::from_u128(0xb0b0_0000_0000_4000_8000_0000_0000_0002);

pub(crate) fn alice() -> Identity {
    Identity::new(ALICE_ID, "alice@breakfree.com")
}

pub(crate) fn alice_profile() -> Profile {
    Profile {
        id: ALICE_ID,
        name: String::from("Alice"),
        role: Role::Admin,
        avatar_url: Some(String::from("https://cdn.breakfree.com/a.png")),
    }
}

pub(crate) fn bob() -> Identity {
    Identity::new(BOB_ID, "bob@breakfree.com")
}

pub(crate) fn bob_profile() -> Profile {
    Profile {
        id: BOB_ID,
        name: String::from("Bob"),
        role: Role::User,
        avatar_url: None,
    }
}

/// Recommended timeouts and retry counts.
pub(crate) fn settings() -> SessionSettings {
    SessionSettings {
        session_retry: RetryPolicy {
            max_retries: 3,
            timeout: Duration::from_secs(15),
            backoff: Backoff::Exponential {
                initial: Duration::from_secs(1),
                multiplier: 1.5,
                max: Duration::from_secs(10),
            },
            jitter: false,
        },
        profile_retry: RetryPolicy {
            max_retries: 2,
            timeout: Duration::from_secs(15),
            backoff: Backoff::Fixed(Duration::from_secs(3)),
            jitter: false,
        },
        sign_out_timeout: Duration::from_secs(5),
    }
}

pub(crate) fn memory_cache() -> (Arc<MemoryStore>, SessionCache) {
    let store = Arc::new(MemoryStore::new());
    let cache = SessionCache::new(store.clone());
    (store, cache)
}

/// One scripted answer from the backend.
pub(crate) enum Reply<T> {
    Value(T),
    Fail(SessionError),
    /// Never settles; only a timeout ends the call
    Hang,
}

impl<T> Reply<T> {
    async fn resolve(self) -> SessionResult<T> {
        match self {
            Reply::Value(value) => Ok(value),
            Reply::Fail(error) => Err(error),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Queue of replies for one backend operation, with a fallback once drained.
pub(crate) struct Script<T> {
    queue: Mutex<VecDeque<Reply<T>>>,
    fallback: fn() -> Reply<T>,
    calls: AtomicU32,
}

impl<T> Script<T> {
    fn new(fallback: fn() -> Reply<T>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicU32::new(0),
        }
    }

    fn next(&self) -> Reply<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| (self.fallback)())
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Backend whose every answer is scripted by the test.
pub(crate) struct ScriptedBackend {
    pub(crate) session: Script<Option<Identity>>,
    pub(crate) sign_in: Script<Identity>,
    pub(crate) sign_out: Script<()>,
    pub(crate) profile: Script<Profile>,
}

impl ScriptedBackend {
    /// No remote session; sign-in and profile succeed as alice.
    pub(crate) fn new() -> Self {
        Self {
            session: Script::new(|| Reply::Value(None)),
            sign_in: Script::new(|| Reply::Value(alice())),
            sign_out: Script::new(|| Reply::Value(())),
            profile: Script::new(|| Reply::Value(alice_profile())),
        }
    }

    pub(crate) fn session_fallback(mut self, fallback: fn() -> Reply<Option<Identity>>) -> Self {
        self.session.fallback = fallback;
        self
    }

    pub(crate) fn sign_in_fallback(mut self, fallback: fn() -> Reply<Identity>) -> Self {
        self.sign_in.fallback = fallback;
        self
    }

    pub(crate) fn sign_out_fallback(mut self, fallback: fn() -> Reply<()>) -> Self {
        self.sign_out.fallback = fallback;
        self
    }

    pub(crate) fn profile_fallback(mut self, fallback: fn() -> Reply<Profile>) -> Self {
        self.profile.fallback = fallback;
        self
    }

    pub(crate) fn then_session(self, reply: Reply<Option<Identity>>) -> Self {
        self.session.queue.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn then_profile(self, reply: Reply<Profile>) -> Self {
        self.profile.queue.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn remote_calls(&self) -> u32 {
        self.session.calls() + self.sign_in.calls() + self.sign_out.calls() + self.profile.calls()
    }
}

#[async_trait]
impl AuthBackend for ScriptedBackend {
    async fn get_session(&self) -> SessionResult<Option<Identity>> {
        self.session.next().resolve().await
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> SessionResult<Identity> {
        self.sign_in.next().resolve().await
    }

    async fn sign_out(&self) -> SessionResult<()> {
        self.sign_out.next().resolve().await
    }

    async fn get_profile(&self, _id: Uuid) -> SessionResult<Profile> {
        self.profile.next().resolve().await
    }
}
