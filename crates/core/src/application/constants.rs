// Scheduler and classification constants (no magic values)
use std::time::Duration;

/// Interval between successful cycles when `--every` is absent or invalid
pub const DEFAULT_INTERVAL_HOURS: f64 = 24.0;

/// Upper bound (exclusive) of the jitter added after a successful cycle
pub const JITTER_MAX: Duration = Duration::from_millis(30_000);

/// Backoff grows by this much per consecutive failure
pub const BACKOFF_STEP: Duration = Duration::from_secs(5);

/// Backoff never exceeds this
pub const BACKOFF_CAP: Duration = Duration::from_secs(60);

/// Only status accepted for the task listing
pub const LISTING_OK_STATUS: u16 = 200;

/// HTTP status treated as a rejected session
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Response snippet length carried by a submit error
pub const SUBMIT_SNIPPET_CHARS: usize = 200;

/// Response snippet length carried by a fetch error
pub const FETCH_SNIPPET_CHARS: usize = 160;

/// Error message length written to the log per failed cycle
pub const LOG_ERROR_CHARS: usize = 300;
