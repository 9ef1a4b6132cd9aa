//! End-to-end session flows over the fixture backend and a file-backed cache

use bf_session::{
    AuthFailure, AuthStatus, BootstrapOutcome, FileStore, FixtureBackend, Role, SessionBootstrapper,
    SessionCache, SessionSettings,
};

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

fn bootstrapper(cache_path: &Path, backend: Arc<FixtureBackend>) -> SessionBootstrapper {
    let store = Arc::new(FileStore::open(cache_path).unwrap());
    SessionBootstrapper::new(backend, SessionCache::new(store), SessionSettings::default())
}

#[tokio::test]
async fn test_fresh_install_boots_unauthenticated() {
    let temp = TempDir::new().unwrap();
    let session = bootstrapper(&temp.path().join("session.json"), Arc::new(FixtureBackend::demo()));

    let outcome = session.bootstrap().await;

    assert_eq!(
        outcome,
        BootstrapOutcome::Completed(AuthStatus::Unauthenticated)
    );
    assert!(!session.state().is_loading());
}

#[tokio::test]
async fn test_sign_in_survives_restart_through_cache() {
    let temp = TempDir::new().unwrap();
    let cache_path = temp.path().join("session.json");

    // First run: sign in
    let first = bootstrapper(&cache_path, Arc::new(FixtureBackend::demo()));
    first.bootstrap().await;
    first
        .sign_in("admin@breakfree.com", "admin123")
        .await
        .unwrap();
    assert_eq!(first.state().status(), AuthStatus::Authenticated);
    drop(first);

    // Second run: a fresh backend has no session, so only the cache can restore it
    let second = bootstrapper(&cache_path, Arc::new(FixtureBackend::demo()));
    let outcome = second.bootstrap().await;

    assert_eq!(outcome, BootstrapOutcome::Completed(AuthStatus::Authenticated));
    let state = second.state();
    assert_eq!(state.identity().map(|i| i.email.as_str()), Some("admin@breakfree.com"));
    assert_eq!(state.profile().map(|p| p.role), Some(Role::Admin));
}

#[tokio::test]
async fn test_sign_out_removes_cache_file() {
    let temp = TempDir::new().unwrap();
    let cache_path = temp.path().join("session.json");
    let session = bootstrapper(&cache_path, Arc::new(FixtureBackend::demo()));
    session
        .sign_in("editor@breakfree.com", "editor123")
        .await
        .unwrap();
    assert!(cache_path.exists());

    session.sign_out().await;

    assert_eq!(session.state().status(), AuthStatus::Unauthenticated);
    assert!(!cache_path.exists());

    let restarted = bootstrapper(&cache_path, Arc::new(FixtureBackend::demo()));
    assert_eq!(
        restarted.bootstrap().await,
        BootstrapOutcome::Completed(AuthStatus::Unauthenticated)
    );
}

#[tokio::test]
async fn test_wrong_password_leaves_session_signed_out() {
    let temp = TempDir::new().unwrap();
    let cache_path = temp.path().join("session.json");
    let session = bootstrapper(&cache_path, Arc::new(FixtureBackend::demo()));

    let err = session
        .sign_in("editor@breakfree.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.auth_failure(), Some(AuthFailure::InvalidCredentials));
    assert_eq!(err.user_message(), "Invalid email or password.");
    assert_eq!(session.state().status(), AuthStatus::Unauthenticated);
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn test_handle_observes_sign_in() {
    let temp = TempDir::new().unwrap();
    let session = bootstrapper(&temp.path().join("session.json"), Arc::new(FixtureBackend::demo()));
    let mut handle = session.handle();

    session
        .sign_in("editor@breakfree.com", "editor123")
        .await
        .unwrap();

    assert!(handle.changed().await);
    assert_eq!(handle.status(), AuthStatus::Authenticated);
    assert!(!handle.is_loading());
}

#[tokio::test]
async fn test_refresh_profile_keeps_authenticated_session() {
    let temp = TempDir::new().unwrap();
    let session = bootstrapper(&temp.path().join("session.json"), Arc::new(FixtureBackend::demo()));
    session
        .sign_in("admin@breakfree.com", "admin123")
        .await
        .unwrap();

    let outcome = session.refresh_profile().await.unwrap();

    assert_eq!(outcome, BootstrapOutcome::Completed(AuthStatus::Authenticated));
}
