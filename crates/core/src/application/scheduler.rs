//! Scheduler Loop - repeats the cycle forever
//!
//! Two transient states:
//! - Running: after a success, wait `interval + jitter` and run again
//! - Backoff: after a failure, wait `min(cap, step * failures)` and retry
//!
//! The loop never ends by itself; the process is stopped from outside.

use crate::application::constants::{DEFAULT_INTERVAL_HOURS, JITTER_MAX, LOG_ERROR_CHARS};
use crate::application::{DailyTaskRunner, RetryPolicy};
use crate::domain::LoopState;
use crate::error::truncate_chars;
use crate::port::{JitterSource, Sleeper};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Parse an `--every` value, falling back to 24h when absent or not a
/// positive finite number
pub fn interval_hours_or_default(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(DEFAULT_INTERVAL_HOURS)
}

/// Timing configuration of the loop
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub interval_hours: f64,
    pub jitter_max: Duration,
    pub retry_policy: RetryPolicy,
}

impl SchedulerConfig {
    pub fn from_interval_hours(interval_hours: f64) -> Self {
        Self {
            interval_hours,
            jitter_max: JITTER_MAX,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Interval in whole milliseconds (saturating)
    pub fn interval(&self) -> Duration {
        Duration::from_millis((self.interval_hours * MILLIS_PER_HOUR) as u64)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from_interval_hours(DEFAULT_INTERVAL_HOURS)
    }
}

/// Orchestrates cycles with an explicit [`LoopState`] threaded through
pub struct SchedulerLoop {
    runner: DailyTaskRunner,
    config: SchedulerConfig,
    sleeper: Arc<dyn Sleeper>,
    jitter: Arc<dyn JitterSource>,
}

impl SchedulerLoop {
    pub fn new(
        runner: DailyTaskRunner,
        config: SchedulerConfig,
        sleeper: Arc<dyn Sleeper>,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            runner,
            config,
            sleeper,
            jitter,
        }
    }

    /// Run forever
    pub async fn run(&self) {
        info!(
            interval_hours = self.config.interval_hours,
            "Daemon start - interval {}h", self.config.interval_hours
        );

        let mut state = LoopState::new();
        loop {
            state = self.step(state).await;
        }
    }

    /// One iteration: run a cycle, then sleep for the computed wait
    pub async fn step(&self, state: LoopState) -> LoopState {
        let (next, wait) = self.tick(state).await;
        self.sleeper.sleep(wait).await;
        next
    }

    /// Run a cycle and compute the next state and wait, without sleeping
    pub async fn tick(&self, state: LoopState) -> (LoopState, Duration) {
        match self.runner.run_once().await {
            Ok(_) => {
                let wait = self.success_wait();
                info!(
                    wait_ms = wait.as_millis() as u64,
                    "Next run in ~{}h", self.config.interval_hours
                );
                (state.after_success(), wait)
            }
            Err(e) => {
                let next = state.after_failure();
                let backoff = self.config.retry_policy.backoff(&next);
                let message = truncate_chars(&e.to_string(), LOG_ERROR_CHARS);
                error!(
                    consecutive_failures = next.consecutive_failures(),
                    retry_in_secs = backoff.as_secs(),
                    "ERROR: {}. Retry in {}s",
                    message,
                    backoff.as_secs()
                );
                (next, backoff)
            }
        }
    }

    /// Interval plus jitter in `[0, jitter_max)`
    pub fn success_wait(&self) -> Duration {
        let jitter_ms = self.jitter.jitter_ms(self.config.jitter_max.as_millis() as u64);
        self.config.interval() + Duration::from_millis(jitter_ms)
    }
}
