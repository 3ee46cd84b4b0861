// Timing Ports (for testability)

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Suspension point between cycles (allows instant sleeps in tests)
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio sleeper (production)
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Source of the random delay added after a successful cycle
pub trait JitterSource: Send + Sync {
    /// Uniform value in `[0, upper_exclusive_ms)`, or 0 when the bound is 0
    fn jitter_ms(&self, upper_exclusive_ms: u64) -> u64;
}

/// Thread-local RNG jitter (production)
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn jitter_ms(&self, upper_exclusive_ms: u64) -> u64 {
        if upper_exclusive_ms == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper_exclusive_ms)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Sleeper that returns immediately and records requested durations
    #[derive(Default)]
    pub struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn slept(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    /// Jitter pinned to a value (clamped below the bound)
    pub struct FixedJitter(pub u64);

    impl JitterSource for FixedJitter {
        fn jitter_ms(&self, upper_exclusive_ms: u64) -> u64 {
            self.0.min(upper_exclusive_ms.saturating_sub(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_jitter_stays_in_range() {
        let jitter = RandomJitter;
        for _ in 0..1000 {
            assert!(jitter.jitter_ms(30_000) < 30_000);
        }
        assert_eq!(jitter.jitter_ms(0), 0);
    }

    #[test]
    fn test_tokio_sleeper_zero_duration() {
        tokio_test::block_on(TokioSleeper.sleep(Duration::ZERO));
    }
}
