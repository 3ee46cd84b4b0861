//! Checkin Agent - Main Entry Point
//! Loads credentials, probes the session, claims the daily task, sleeps, repeats.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// Import workspace crates
use checkin_core::application::{DailyTaskRunner, SchedulerConfig, SchedulerLoop};
use checkin_core::port::timing::{RandomJitter, TokioSleeper};
use checkin_infra_file::FileCredentialSource;
use checkin_infra_http::{ApiConfig, HttpRewardsApi};

use cli::Cli;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CHALLENGE: &str = checkin_infra_http::rewards_client::DEFAULT_CHALLENGE;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Parse flags, then initialize logging
    let cli = Cli::parse();
    logging::init()?;

    info!("Checkin Agent v{} starting...", VERSION);

    // 2. Resolve configuration
    let interval_hours = cli.interval_hours();
    let env_file = cli.env_file_path();
    let api_config = ApiConfig {
        base_url: cli.api_base.clone(),
        origin: cli.origin.clone(),
        challenge: DEFAULT_CHALLENGE.to_string(),
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
    };

    info!(
        env_file = %env_file,
        api_base = %api_config.base_url,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let api = Arc::new(
        HttpRewardsApi::new(api_config)
            .map_err(|e| anyhow::anyhow!("HTTP client creation failed: {}", e))?,
    );
    let credentials = Arc::new(FileCredentialSource::new(env_file));
    let runner = DailyTaskRunner::new(credentials, api);

    // 4. Single cycle mode
    if cli.once {
        tokio::select! {
            result = run_single(&runner) => result?,
            signal = shutdown_signal() => {
                info!("Stop ({}).", signal?);
            }
        }
        return Ok(());
    }

    // 5. Scheduler loop until a termination signal
    let scheduler = SchedulerLoop::new(
        runner,
        SchedulerConfig::from_interval_hours(interval_hours),
        Arc::new(TokioSleeper),
        Arc::new(RandomJitter),
    );

    info!("Press Ctrl+C to stop");

    // The in-flight cycle or sleep is dropped, not awaited
    tokio::select! {
        _ = scheduler.run() => {}
        signal = shutdown_signal() => {
            info!("Stop ({}).", signal?);
        }
    }

    Ok(())
}

/// One cycle for `--once`; an error here becomes exit code 1
async fn run_single(runner: &DailyTaskRunner) -> Result<()> {
    let report = runner
        .run_once()
        .await
        .map_err(|e| anyhow::anyhow!("Cycle failed: {}", e))?;

    info!(
        task_id = %report.task.id,
        state = %report.submission.state_label(),
        "Single run complete"
    );
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on Unix
async fn shutdown_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|_| "SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|_| "SIGINT")
    }
}
