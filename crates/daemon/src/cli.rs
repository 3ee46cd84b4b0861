//! Command-line surface

use clap::Parser;

use checkin_core::application::interval_hours_or_default;
use checkin_infra_http::rewards_client::{DEFAULT_API_BASE, DEFAULT_ORIGIN};

#[derive(Parser, Debug)]
#[command(name = "checkin-agent")]
#[command(about = "Claims the daily check-in task on a fixed interval", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Hours between successful runs (positive number; anything else means 24)
    #[arg(
        long,
        env = "CHECKIN_EVERY",
        value_name = "HOURS",
        num_args = 0..=1,
        default_missing_value = "",
        allow_negative_numbers = true
    )]
    pub every: Option<String>,

    /// Credential file with DYNAMIC_TOKEN (re-read every run)
    #[arg(long, env = "CHECKIN_ENV_FILE", default_value = ".env")]
    pub env_file: String,

    /// API base URL
    #[arg(long, env = "CHECKIN_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Origin header sent with every request
    #[arg(long, env = "CHECKIN_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CHECKIN_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub fn interval_hours(&self) -> f64 {
        interval_hours_or_default(self.every.as_deref())
    }

    /// Credential file path with `~` expanded
    pub fn env_file_path(&self) -> String {
        shellexpand::tilde(&self.env_file).into_owned()
    }
}
