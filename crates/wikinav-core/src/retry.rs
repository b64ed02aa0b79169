//! Retry policy and bounded retry loop shared by every remote backend

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Bounded exponential backoff for transient remote failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> usize {
    5
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Number of retries after the first attempt
    pub fn retries(&self) -> usize {
        self.max_attempts.saturating_sub(1)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms.max(self.min_delay_ms))
    }
}

/// Failure of a remote call, as seen by [`retry_remote`]
pub trait RemoteError: std::fmt::Display + Sized {
    /// Whether retrying the same request may succeed
    fn is_transient(&self) -> bool;

    /// Wait the remote side asked for before the next attempt
    fn retry_after(&self) -> Option<Duration> {
        None
    }

    fn cancelled() -> Self;

    fn retries_exhausted(attempts: usize, last: Self) -> Self;
}

/// Exponential backoff with jitter derived from a retry policy
pub fn backoff(policy: &RetryPolicy) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(policy.min_delay())
        .with_max_delay(policy.max_delay())
        .with_factor(2.0)
        .with_jitter()
        .with_max_times(policy.retries())
}

/// Never wait less than a rate-limited server asked for.
///
/// Signature matches `backon::Retry::adjust`: returning `None` stops retrying.
pub fn adjust_for_rate_limit<E: RemoteError>(err: &E, delay: Option<Duration>) -> Option<Duration> {
    match (err.retry_after(), delay) {
        (Some(wait), Some(delay)) => Some(delay.max(wait)),
        (_, delay) => delay,
    }
}

/// Run `call` until it succeeds, fails permanently, runs out of attempts or
/// `cancel` fires.
///
/// A transient failure that outlives every attempt is wrapped with
/// [`RemoteError::retries_exhausted`].
pub async fn retry_remote<T, E, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    what: &str,
    call: F,
) -> std::result::Result<T, E>
where
    E: RemoteError,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let attempts = policy.max_attempts.max(1);
    let retried = call
        .retry(backoff(policy))
        .sleep(tokio::time::sleep)
        .when(E::is_transient)
        .adjust(adjust_for_rate_limit::<E>)
        .notify(|err: &E, delay: Duration| {
            tracing::warn!("{} failed ({}), retrying in {:?}", what, err, delay);
        });

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(E::cancelled()),
        outcome = retried => outcome,
    };

    outcome.map_err(|err| {
        if err.is_transient() && attempts > 1 {
            E::retries_exhausted(attempts, err)
        } else {
            err
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    enum Flaky {
        Busy,
        Throttled(u64),
        Denied,
        Cancelled,
        GaveUp(usize, Box<Flaky>),
    }

    impl std::fmt::Display for Flaky {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl RemoteError for Flaky {
        fn is_transient(&self) -> bool {
            matches!(self, Self::Busy | Self::Throttled(_))
        }

        fn retry_after(&self) -> Option<Duration> {
            match self {
                Self::Throttled(ms) => Some(Duration::from_millis(*ms)),
                _ => None,
            }
        }

        fn cancelled() -> Self {
            Self::Cancelled
        }

        fn retries_exhausted(attempts: usize, last: Self) -> Self {
            Self::GaveUp(attempts, Box::new(last))
        }
    }

    fn quick(max_attempts: usize) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            min_delay_ms: 1,
            max_delay_ms: 2,
        }
    }

    #[test]
    fn test_adjust_rate_limited_uses_max() {
        let delay = adjust_for_rate_limit(&Flaky::Throttled(5000), Some(Duration::from_secs(1)));
        assert_eq!(delay, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_adjust_rate_limited_backoff_already_larger() {
        let delay = adjust_for_rate_limit(&Flaky::Throttled(500), Some(Duration::from_secs(2)));
        assert_eq!(delay, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_adjust_passes_other_errors_through() {
        let delay = adjust_for_rate_limit(&Flaky::Busy, Some(Duration::from_secs(1)));
        assert_eq!(delay, Some(Duration::from_secs(1)));
        assert_eq!(adjust_for_rate_limit(&Flaky::Throttled(5000), None), None);
    }

    #[tokio::test]
    async fn test_transient_failure_recovers() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result = retry_remote(&quick(3), &CancellationToken::new(), "test", || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Flaky::Busy)
            } else {
                Ok("done")
            }
        })
        .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_wait_is_honored() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let started = tokio::time::Instant::now();
        let result = retry_remote(&quick(2), &CancellationToken::new(), "test", || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Flaky::Throttled(50))
            } else {
                Ok(())
            }
        })
        .await;
        assert_eq!(result, Ok(()));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: std::result::Result<(), Flaky> =
            retry_remote(&quick(3), &CancellationToken::new(), "test", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Flaky::Busy)
            })
            .await;
        assert_eq!(result, Err(Flaky::GaveUp(3, Box::new(Flaky::Busy))));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_keeps_original_error() {
        let result: std::result::Result<(), Flaky> =
            retry_remote(&quick(1), &CancellationToken::new(), "test", || async move {
                Err(Flaky::Busy)
            })
            .await;
        assert_eq!(result, Err(Flaky::Busy));
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: std::result::Result<(), Flaky> =
            retry_remote(&quick(5), &CancellationToken::new(), "test", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Flaky::Denied)
            })
            .await;
        assert_eq!(result, Err(Flaky::Denied));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancellation_wins() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: std::result::Result<u8, Flaky> =
            retry_remote(&quick(3), &cancel, "test", || async move { Ok(1) }).await;
        assert_eq!(result, Err(Flaky::Cancelled));
    }

    #[test]
    fn test_retries_exclude_first_attempt() {
        assert_eq!(RetryPolicy::default().retries(), 4);
        assert_eq!(RetryPolicy::none().retries(), 0);
        let zero = RetryPolicy {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(zero.retries(), 0);
    }

    #[test]
    fn test_max_delay_never_below_min() {
        let policy = RetryPolicy {
            max_attempts: 3,
            min_delay_ms: 500,
            max_delay_ms: 100,
        };
        assert_eq!(policy.max_delay(), Duration::from_millis(500));
    }
}
