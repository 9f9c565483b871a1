use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::core::DashError;

/// Specifies the backoff strategy for retrying rate-limited requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay before retry `n` (0-based) is `base * factor^n`, capped at `max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after failed attempt number `retry` (0-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff: Backoff::Exponential {
                base: Duration::from_secs(1),
                factor: 2.0,
                max: Duration::from_secs(60),
            },
        }
    }
}

/// Something that can wait. Swapped out in tests to observe backoff delays.
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    fn sleep(&self, dur: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, dur: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(dur))
    }
}

/// Runs `call` until it succeeds, fails with something other than a rate limit,
/// or `cfg.max_attempts` attempts have been made.
///
/// Only [`DashError::RateLimited`] is retried; every other error is returned unchanged
/// on the attempt that produced it. Exhaustion returns the last rate-limit error.
///
/// # Errors
///
/// Propagates the error of the final attempt.
pub async fn with_retry<T, F, Fut>(
    cfg: &RetryConfig,
    sleeper: &dyn Sleeper,
    mut call: F,
) -> Result<T, DashError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DashError>>,
{
    let max_attempts = if cfg.enabled {
        cfg.max_attempts.max(1)
    } else {
        1
    };

    let mut attempt = 1;
    loop {
        match call().await {
            Err(e) if e.is_rate_limited() && attempt < max_attempts => {
                let delay = cfg.backoff.delay(attempt - 1);
                #[cfg(feature = "tracing")]
                tracing::warn!(attempt, max_attempts, ?delay, error = %e, "rate limited; backing off");
                sleeper.sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
