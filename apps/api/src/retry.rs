//! Bounded exponential backoff shared by the LLM client and the provisioning wait.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay to sleep before attempt number `attempt` (0-based).
    /// The first attempt runs immediately; later ones double the base delay up to `max_delay`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(250), Duration::from_secs(1))
    }
}

/// Polls `lookup` until it yields a value or the policy's attempts run out.
///
/// Returns `Ok(None)` when every attempt came back empty. An error from `lookup`
/// ends the wait immediately.
pub async fn poll_until_found<T, E, F, Fut>(policy: &RetryPolicy, mut lookup: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for attempt in 0..policy.max_attempts.max(1) {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            debug!(attempt, delay_ms = delay.as_millis() as u64, "waiting before retry");
            tokio::time::sleep(delay).await;
        }
        if let Some(found) = lookup().await? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
