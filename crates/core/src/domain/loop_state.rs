// Loop State - the only state carried between cycles

/// Counter threaded through each scheduler iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopState {
    consecutive_failures: u32,
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// State after a successful cycle (streak reset)
    pub fn after_success(self) -> Self {
        Self {
            consecutive_failures: 0,
        }
    }

    /// State after a failed cycle
    pub fn after_failure(self) -> Self {
        Self {
            consecutive_failures: self.consecutive_failures.saturating_add(1),
        }
    }
}
