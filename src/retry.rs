use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry behavior for a class of operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Cap on the backed-off delay
    pub max_delay: Duration,
    /// Exponential backoff factor per retry
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: locale file fetches (3 attempts with short delays)
    /// Delays: 250ms, 500ms = 750ms total wait time
    pub fn locale_fetch() -> Self {
        Self::new(3, Duration::from_millis(250))
            .with_max_delay(Duration::from_secs(1))
            .with_backoff_multiplier(2.0)
    }

    /// Delay before attempt number `attempt` (0-indexed, so attempt 0 is free).
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let backed_off = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        Duration::from_millis(backed_off as u64).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::locale_fetch()
    }
}

/// Execute an async operation with retries, using a predicate to decide
/// whether an error is worth another attempt.
///
/// Transient failures (server errors, unreachable hosts) retry with
/// exponential backoff; anything the predicate rejects fails immediately.
///
/// # Panics
/// Panics if `config.max_attempts` is 0
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    assert!(
        config.max_attempts >= 1,
        "RetryConfig.max_attempts must be >= 1, got {}",
        config.max_attempts
    );

    let total = config.max_attempts;
    let mut last_error: Option<E> = None;

    for attempt in 0..total {
        // No delay before the first attempt
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!("{}: retrying ({}/{}) after {:?}", operation_name, attempt + 1, total, delay);
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("{}: succeeded on attempt {}/{}", operation_name, attempt + 1, total);
                }
                return Ok(result);
            }
            Err(e) if !should_retry(&e) => {
                warn!("{}: non-retryable error on attempt {}/{}: {}", operation_name, attempt + 1, total, e);
                return Err(e);
            }
            Err(e) => {
                let remaining = total - attempt - 1;
                if remaining > 0 {
                    warn!("{}: attempt {}/{} failed ({}), {} left", operation_name, attempt + 1, total, e, remaining);
                } else {
                    warn!("{}: all {} attempts failed, last error: {}", operation_name, total, e);
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.expect("at least one attempt was made"))
}
