// Daily Task Runner - one probe -> fetch -> select -> submit cycle

use crate::application::{SessionProbe, TaskSelector, TaskSubmitter};
use crate::domain::{SubmissionResult, Task};
use crate::error::Result;
use crate::port::{CredentialSource, RewardsApi};
use std::sync::Arc;

/// What a successful cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub probe_status: u16,
    pub task: Task,
    pub submission: SubmissionResult,
}

/// Runs a single cycle, strictly sequentially
///
/// Credentials are reloaded on every call so a rotated file applies to the
/// next cycle without a restart.
pub struct DailyTaskRunner {
    credentials: Arc<dyn CredentialSource>,
    probe: SessionProbe,
    selector: TaskSelector,
    submitter: TaskSubmitter,
}

impl DailyTaskRunner {
    pub fn new(credentials: Arc<dyn CredentialSource>, api: Arc<dyn RewardsApi>) -> Self {
        Self {
            credentials,
            probe: SessionProbe::new(Arc::clone(&api)),
            selector: TaskSelector::new(Arc::clone(&api)),
            submitter: TaskSubmitter::new(api),
        }
    }

    pub async fn run_once(&self) -> Result<CycleReport> {
        let credentials = self.credentials.load()?;

        let probe_status = self.probe.probe(&credentials).await?;
        let task = self.selector.select(&credentials).await?;
        let submission = self.submitter.submit(&credentials, &task).await?;

        Ok(CycleReport {
            probe_status,
            task,
            submission,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionState;
    use crate::error::AppError;
    use crate::port::credential_source::mocks::StaticCredentialSource;
    use crate::port::rewards_api::mocks::{ApiCall, MockRewardsApi};
    use crate::port::HttpReply;
    use serde_json::json;

    fn daily_listing(api: &MockRewardsApi) {
        api.set_tasks_json(json!([{"id": "daily-1", "title": "Daily Check-In"}]));
    }

    #[tokio::test]
    async fn test_full_cycle() {
        let api = Arc::new(MockRewardsApi::new());
        daily_listing(&api);
        let runner = DailyTaskRunner::new(
            Arc::new(StaticCredentialSource::with_token("token")),
            api.clone(),
        );

        let report = runner.run_once().await.unwrap();
        assert_eq!(report.probe_status, 200);
        assert_eq!(report.task.id, "daily-1");
        assert_eq!(report.submission.state, SubmissionState::Ok);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::CurrentUser,
                ApiCall::ChallengeTasks,
                ApiCall::DoTask("daily-1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_network_call() {
        let api = Arc::new(MockRewardsApi::new());
        let runner =
            DailyTaskRunner::new(Arc::new(StaticCredentialSource::missing()), api.clone());

        let result = runner.run_once().await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_rejection_stops_cycle() {
        let api = Arc::new(MockRewardsApi::new());
        daily_listing(&api);
        api.set_me(HttpReply::new(401, ""));
        let runner = DailyTaskRunner::new(
            Arc::new(StaticCredentialSource::with_token("token")),
            api.clone(),
        );

        assert!(matches!(
            runner.run_once().await,
            Err(AppError::Auth { .. })
        ));
        assert_eq!(api.calls(), vec![ApiCall::CurrentUser]);
    }

    #[tokio::test]
    async fn test_not_found_submits_nothing() {
        let api = Arc::new(MockRewardsApi::new());
        let runner = DailyTaskRunner::new(
            Arc::new(StaticCredentialSource::with_token("token")),
            api.clone(),
        );

        assert!(matches!(
            runner.run_once().await,
            Err(AppError::NotFound { .. })
        ));
        assert!(!api
            .calls()
            .iter()
            .any(|c| matches!(c, ApiCall::DoTask(_))));
    }

    #[tokio::test]
    async fn test_credentials_reloaded_every_cycle() {
        let api = Arc::new(MockRewardsApi::new());
        daily_listing(&api);
        let source = Arc::new(StaticCredentialSource::with_token("token"));
        let runner = DailyTaskRunner::new(source.clone(), api);

        runner.run_once().await.unwrap();
        runner.run_once().await.unwrap();
        assert_eq!(source.load_count(), 2);
    }
}
