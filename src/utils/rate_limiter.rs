use governor::{Quota, RateLimiter as GovernorRateLimiter};
use nonzero_ext::*;
use std::time::Duration;
use tokio::time::sleep;

/// Paces outbound API requests with a fixed delay between calls.
pub struct RateLimiter {
    limiter: GovernorRateLimiter<
        governor::state::direct::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
    delay: Duration,
}

impl RateLimiter {
    pub fn with_delay(delay: Duration) -> Self {
        let quota = Quota::per_second(nonzero!(1u32));
        Self {
            limiter: GovernorRateLimiter::direct(quota),
            delay,
        }
    }

    /// Wait until the next request is allowed.
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            sleep(Duration::from_millis(100)).await;
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_enforces_configured_delay() {
        let limiter = RateLimiter::with_delay(Duration::from_millis(50));
        let start = std::time::Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn zero_delay_does_not_block() {
        let limiter = RateLimiter::with_delay(Duration::ZERO);
        limiter.wait().await;
    }
}
