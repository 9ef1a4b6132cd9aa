use crate::tests::{EnvGuard, setup_config_dir};
use crate::{BackendKind, Config};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.remote.backend, eq(BackendKind::Fixture));
    assert_that!(config.session.session_timeout_secs, eq(15));
    assert_that!(config.session.profile_timeout_secs, eq(15));
    assert_that!(config.session.sign_out_timeout_secs, eq(5));
    assert_that!(config.retry.max_retries, eq(3));
    assert_that!(config.retry.backoff_multiplier, eq(1.5));
    assert_that!(config.profile_retry.max_retries, eq(2));
    assert_that!(config.profile_retry.delay_ms, eq(3000));
    assert!(config.logging.file.is_none());
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [remote]
            backend = "remote"
            url = "https://demo.supabase.co"
            anon_key = "public-anon-key"

            [session]
            session_timeout_secs = 20

            [profile_retry]
            max_retries = 4
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.remote.backend, eq(BackendKind::Remote));
    assert_eq!(config.remote.url.as_deref(), Some("https://demo.supabase.co"));
    assert_that!(config.session.session_timeout_secs, eq(20));
    assert_that!(config.session.profile_timeout_secs, eq(15));
    assert_that!(config.profile_retry.max_retries, eq(4));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[session]\nsession_timeout_secs = 20",
    )
    .unwrap();
    let _timeout = EnvGuard::set("BF_SESSION_TIMEOUT_SECS", "18");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.session.session_timeout_secs, eq(18));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _backend = EnvGuard::set("BF_REMOTE_BACKEND", "remote");
    let _url = EnvGuard::set("BF_REMOTE_URL", "http://127.0.0.1:54321");
    let _key = EnvGuard::set("BF_REMOTE_ANON_KEY", "anon");
    let _jitter = EnvGuard::set("BF_RETRY_JITTER", "1");
    let _colored = EnvGuard::set("BF_LOG_COLORED", "false");
    let _level = EnvGuard::set("BF_LOG_LEVEL", "debug");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.remote.backend, eq(BackendKind::Remote));
    assert_that!(config.retry.jitter, eq(true));
    assert_that!(config.logging.colored, eq(false));
    assert_that!(*config.logging.level, eq(log::LevelFilter::Debug));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_config_dir_env_when_cache_path_then_joined_under_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("BF_CACHE_FILE", "state/session.json");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(
        config.cache_path().unwrap(),
        temp.path().join("state/session.json")
    );
}
