//! Tokio-based clock implementation.

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Production clock implementation using Tokio's time functions.
///
/// Sleeps on the Tokio timer, so it needs a runtime with time enabled. Tests
/// use [`crate::testing::FakeClock`] instead.
///
/// # Examples
///
/// ```rust
/// use swap_bridge::providers::TokioClock;
///
/// let clock = TokioClock::new();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TokioClock;

impl TokioClock {
    /// Creates a new Tokio clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_now() {
        let clock = TokioClock::new();
        let before = tokio::time::Instant::now();

        clock.sleep(Duration::from_secs(30)).await;

        assert!(tokio::time::Instant::now() - before >= Duration::from_secs(30));
    }
}
