//! Log subscriber setup

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when RUST_LOG is unset (matches every checkin_* target)
const DEFAULT_FILTER: &str = "checkin=info";

/// Initialize logging
///
/// # Environment Variables
///
/// - `CHECKIN_LOG_FORMAT`: `json` for structured lines, anything else for text
/// - `RUST_LOG`: overrides the default filter
pub fn init() -> Result<()> {
    let log_format = std::env::var("CHECKIN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(false))
                .try_init()?;
        }
    }

    Ok(())
}
