//! Scheduler loop against the real adapters, with instant sleeps

use std::sync::Arc;
use std::time::Duration;

use checkin_core::application::{SchedulerConfig, SchedulerLoop};
use checkin_core::domain::LoopState;
use checkin_core::port::timing::mocks::{FixedJitter, RecordingSleeper};
use checkin_integration_tests::{
    credential_file, mount_me, mount_submit, mount_tasks, runner_for, sample_tasks,
};
use wiremock::MockServer;

#[tokio::test]
async fn test_rotated_credentials_recover_without_restart() {
    let server = MockServer::start().await;
    mount_me(&server, 200).await;
    mount_tasks(&server, sample_tasks()).await;
    mount_submit(&server, 201, "{}").await;

    // Start with a file lacking the token: three failed cycles
    let env = credential_file("ACCESS_TOKEN=acc\n");
    let sleeper = Arc::new(RecordingSleeper::new());
    let scheduler = SchedulerLoop::new(
        runner_for(&server, &env),
        SchedulerConfig::from_interval_hours(12.0),
        sleeper.clone(),
        Arc::new(FixedJitter(1_000)),
    );

    let mut state = LoopState::new();
    for _ in 0..3 {
        state = scheduler.step(state).await;
    }
    assert_eq!(state.consecutive_failures(), 3);

    // Token added in place; the next cycle picks it up
    std::fs::write(env.path(), "DYNAMIC_TOKEN=fresh\n").unwrap();
    state = scheduler.step(state).await;
    assert_eq!(state.consecutive_failures(), 0);

    assert_eq!(
        sleeper.slept(),
        vec![
            Duration::from_secs(5),
            Duration::from_secs(10),
            Duration::from_secs(15),
            Duration::from_millis(12 * 3_600_000 + 1_000),
        ]
    );
}
