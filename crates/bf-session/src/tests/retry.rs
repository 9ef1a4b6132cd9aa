use crate::{Backoff, RetryPolicy, SessionError, with_retry};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::eq;
use tokio::time::Instant;

fn exponential(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        timeout: Duration::from_secs(15),
        backoff: Backoff::Exponential {
            initial: Duration::from_secs(2),
            multiplier: 1.5,
            max: Duration::from_secs(3),
        },
        jitter: false,
    }
}

#[tokio::test(start_paused = true)]
async fn given_immediate_success_when_with_retry_then_single_attempt() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result = with_retry(&exponential(3), "op", || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok::<_, SessionError>(7)
        }
    })
    .await;

    assert_that!(result.unwrap(), eq(7));
    assert_that!(attempts.load(Ordering::SeqCst), eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_non_transient_error_when_with_retry_then_no_retry() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result: Result<(), _> = with_retry(&exponential(3), "op", || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SessionError::not_found("gone"))
        }
    })
    .await;

    assert!(matches!(result, Err(SessionError::NotFound { .. })));
    assert_that!(attempts.load(Ordering::SeqCst), eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_always_connection_error_when_with_retry_then_backoff_capped() {
    let attempts = Arc::new(AtomicU32::new(0));
    let started = Instant::now();

    let result: Result<(), _> = with_retry(&exponential(3), "op", || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SessionError::connection("refused"))
        }
    })
    .await;

    assert!(matches!(result, Err(SessionError::Connection { .. })));
    assert_that!(attempts.load(Ordering::SeqCst), eq(4));
    // 2s, then 3s, then capped at 3s
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(8), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(8_100), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn given_attempt_overruns_timeout_when_with_retry_then_timeout_error() {
    let policy = RetryPolicy {
        max_retries: 0,
        timeout: Duration::from_secs(5),
        backoff: Backoff::Fixed(Duration::from_secs(1)),
        jitter: false,
    };

    let result: Result<(), _> = with_retry(&policy, "get_session", || async {
        std::future::pending::<Result<(), SessionError>>().await
    })
    .await;

    match result {
        Err(SessionError::Timeout {
            operation, timeout, ..
        }) => {
            assert_that!(operation.as_str(), eq("get_session"));
            assert_that!(timeout, eq(Duration::from_secs(5)));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn given_fixed_backoff_when_with_retry_then_same_delay_each_time() {
    let policy = RetryPolicy {
        max_retries: 2,
        timeout: Duration::from_secs(15),
        backoff: Backoff::Fixed(Duration::from_secs(3)),
        jitter: false,
    };
    let started = Instant::now();

    let result: Result<(), _> = with_retry(&policy, "get_profile", || async {
        Err(SessionError::timeout("get_profile", Duration::from_secs(15)))
    })
    .await;

    assert!(result.is_err());
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(6_100), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn given_jitter_when_with_retry_then_delay_within_half_to_one_and_a_half() {
    let policy = RetryPolicy {
        max_retries: 1,
        timeout: Duration::from_secs(15),
        backoff: Backoff::Fixed(Duration::from_secs(2)),
        jitter: true,
    };
    let started = Instant::now();

    let _: Result<(), _> = with_retry(&policy, "op", || async {
        Err(SessionError::connection("refused"))
    })
    .await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(1), "elapsed {elapsed:?}");
    assert!(elapsed <= Duration::from_millis(3_010), "elapsed {elapsed:?}");
}

#[test]
fn given_policy_when_max_attempts_then_retries_plus_one() {
    assert_that!(exponential(3).max_attempts(), eq(4));
    assert_that!(exponential(0).max_attempts(), eq(1));
}
