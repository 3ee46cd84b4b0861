// Rewards API Port
// reason: async-trait for object-safe async methods
use async_trait::async_trait;

use crate::domain::{Credentials, DoTaskRequest};
use crate::error::Result;

/// Raw HTTP reply: status code and body text
///
/// Interpretation (auth rejection, listing parse, claim classification)
/// belongs to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Remote rewards service
///
/// Only transport failures are errors here; any HTTP status is a reply.
#[async_trait]
pub trait RewardsApi: Send + Sync {
    /// `GET /social-pay/me` (cache bypassed)
    async fn current_user(&self, credentials: &Credentials) -> Result<HttpReply>;

    /// `GET /challenges/<challenge>` (cache bypassed)
    async fn challenge_tasks(&self, credentials: &Credentials) -> Result<HttpReply>;

    /// `POST /challenges/do-task`
    async fn do_task(&self, credentials: &Credentials, request: &DoTaskRequest)
        -> Result<HttpReply>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::Mutex;

    /// Recorded call against the mock
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ApiCall {
        CurrentUser,
        ChallengeTasks,
        DoTask(String),
    }

    /// Mock RewardsApi with one canned reply per endpoint
    pub struct MockRewardsApi {
        me: Mutex<HttpReply>,
        tasks: Mutex<HttpReply>,
        submit: Mutex<HttpReply>,
        transport_down: Mutex<bool>,
        calls: Mutex<Vec<ApiCall>>,
    }

    impl MockRewardsApi {
        /// Healthy session, empty listing, 201 on submit
        pub fn new() -> Self {
            Self {
                me: Mutex::new(HttpReply::new(200, "{}")),
                tasks: Mutex::new(HttpReply::new(200, r#"{"tasks":[]}"#)),
                submit: Mutex::new(HttpReply::new(201, r#"{"status":true}"#)),
                transport_down: Mutex::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn set_me(&self, reply: HttpReply) {
            *self.me.lock().unwrap() = reply;
        }

        pub fn set_tasks(&self, reply: HttpReply) {
            *self.tasks.lock().unwrap() = reply;
        }

        pub fn set_tasks_json(&self, tasks: serde_json::Value) {
            self.set_tasks(HttpReply::new(
                200,
                serde_json::json!({ "tasks": tasks }).to_string(),
            ));
        }

        pub fn set_submit(&self, reply: HttpReply) {
            *self.submit.lock().unwrap() = reply;
        }

        pub fn set_transport_down(&self, down: bool) {
            *self.transport_down.lock().unwrap() = down;
        }

        pub fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: ApiCall, reply: &Mutex<HttpReply>) -> Result<HttpReply> {
            self.calls.lock().unwrap().push(call);
            if *self.transport_down.lock().unwrap() {
                return Err(AppError::Transport("connection refused".to_string()));
            }
            Ok(reply.lock().unwrap().clone())
        }
    }

    impl Default for MockRewardsApi {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RewardsApi for MockRewardsApi {
        async fn current_user(&self, _credentials: &Credentials) -> Result<HttpReply> {
            self.record(ApiCall::CurrentUser, &self.me)
        }

        async fn challenge_tasks(&self, _credentials: &Credentials) -> Result<HttpReply> {
            self.record(ApiCall::ChallengeTasks, &self.tasks)
        }

        async fn do_task(
            &self,
            _credentials: &Credentials,
            request: &DoTaskRequest,
        ) -> Result<HttpReply> {
            self.record(ApiCall::DoTask(request.task_guid.clone()), &self.submit)
        }
    }
}
