// Retry logic - capped linear backoff after failed cycles
use crate::application::constants::{BACKOFF_CAP, BACKOFF_STEP};
use crate::domain::LoopState;
use std::time::Duration;

/// Backoff policy
///
/// delay = min(cap, step * consecutive_failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    step: Duration,
    cap: Duration,
}

impl RetryPolicy {
    pub fn new(step: Duration, cap: Duration) -> Self {
        Self { step, cap }
    }

    /// Delay before retrying, given the state after the failure was recorded
    ///
    /// Example with step=5s, cap=60s:
    /// - 1 failure: 5s
    /// - 3 failures: 15s
    /// - 12 failures and beyond: 60s
    pub fn backoff(&self, state: &LoopState) -> Duration {
        self.step
            .saturating_mul(state.consecutive_failures())
            .min(self.cap)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(BACKOFF_STEP, BACKOFF_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failures(n: u32) -> LoopState {
        (0..n).fold(LoopState::new(), |state, _| state.after_failure())
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(&failures(1)), Duration::from_secs(5));
        assert_eq!(policy.backoff(&failures(3)), Duration::from_secs(15));
        assert_eq!(policy.backoff(&failures(11)), Duration::from_secs(55));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(&failures(12)), Duration::from_secs(60));
        assert_eq!(policy.backoff(&failures(500)), Duration::from_secs(60));
    }

    #[test]
    fn test_backoff_restarts_after_success() {
        let policy = RetryPolicy::default();
        let state = failures(7).after_success().after_failure();
        assert_eq!(policy.backoff(&state), Duration::from_secs(5));
    }
}
