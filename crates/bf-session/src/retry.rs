use crate::{SessionError, SessionResult};

use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::{sleep, timeout};

/// Delay schedule between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry
    Fixed(Duration),
    /// Delay grows by `multiplier` after each retry, capped at `max`
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
    },
}

impl Backoff {
    fn initial(&self) -> Duration {
        match self {
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential { initial, max, .. } => (*initial).min(*max),
        }
    }

    fn next(&self, current: Duration) -> Duration {
        match self {
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential {
                multiplier, max, ..
            } => Duration::from_secs_f64(
                (current.as_secs_f64() * multiplier).min(max.as_secs_f64()),
            ),
        }
    }
}

/// Bounded retry with a per-attempt timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Bound on each individual attempt
    pub timeout: Duration,
    pub backoff: Backoff,
    /// Randomize each delay by x0.5 to x1.5
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Execute an async operation under `policy`.
///
/// Each attempt is bounded by `policy.timeout`; an attempt that overruns
/// becomes [`SessionError::Timeout`]. The underlying future is dropped, not
/// cancelled remotely. Only transient errors are retried.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> SessionResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SessionResult<T>>,
{
    let mut attempts = 0;
    let mut delay = policy.backoff.initial();

    loop {
        attempts += 1;

        let outcome = match timeout(policy.timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::timeout(operation_name, policy.timeout)),
        };

        match outcome {
            Ok(result) => {
                if attempts > 1 {
                    info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_transient() || attempts >= policy.max_attempts() {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, attempts, e
                    );
                    return Err(e);
                }

                let actual_delay = if policy.jitter {
                    let jitter_factor = 0.5 + rand::random::<f64>();
                    Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
                } else {
                    delay
                };

                debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name, attempts, e, actual_delay
                );

                sleep(actual_delay).await;

                delay = policy.backoff.next(delay);
            }
        }
    }
}
