// Task Submitter - submits the selected task and classifies the reply

use crate::application::constants::SUBMIT_SNIPPET_CHARS;
use crate::domain::{Credentials, DoTaskRequest, SubmissionResult, SubmissionState, Task};
use crate::error::{truncate_chars, AppError, Result};
use crate::port::{HttpReply, RewardsApi};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Condition on a submit reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMatcher {
    /// Exact HTTP status
    Status(u16),
    /// JSON body carries `"status": true`
    StatusFlagTrue,
    /// HTTP status plus a case-insensitive substring of the body text
    StatusWithBody(u16, &'static str),
}

impl ReplyMatcher {
    fn matches(&self, reply: &HttpReply, json: Option<&Value>) -> bool {
        match *self {
            ReplyMatcher::Status(status) => reply.status == status,
            ReplyMatcher::StatusFlagTrue => {
                json.and_then(|v| v.get("status")) == Some(&Value::Bool(true))
            }
            ReplyMatcher::StatusWithBody(status, needle) => {
                reply.status == status && reply.body.to_lowercase().contains(needle)
            }
        }
    }
}

/// Success classification (first match wins, no match is a submit error)
///
/// The remote answers a repeat claim with "already ..." under either 200 or
/// 400; both count as success.
pub const CLASSIFICATION_TABLE: &[(ReplyMatcher, SubmissionState)] = &[
    (ReplyMatcher::Status(201), SubmissionState::Ok),
    (ReplyMatcher::StatusFlagTrue, SubmissionState::Ok),
    (
        ReplyMatcher::StatusWithBody(200, "already"),
        SubmissionState::AlreadyClaimed,
    ),
    (
        ReplyMatcher::StatusWithBody(400, "already"),
        SubmissionState::AlreadyClaimed,
    ),
];

/// Classify a submit reply against [`CLASSIFICATION_TABLE`]
///
/// A string `state` in the body overrides the table's state; points come
/// from `points`, falling back to `pointsAwarded`.
pub fn classify(reply: &HttpReply) -> Result<SubmissionResult> {
    let json = serde_json::from_str::<Value>(&reply.body).ok();

    let state = CLASSIFICATION_TABLE
        .iter()
        .find(|(matcher, _)| matcher.matches(reply, json.as_ref()))
        .map(|(_, state)| *state)
        .ok_or_else(|| AppError::Submit {
            status: reply.status,
            snippet: truncate_chars(&reply.body, SUBMIT_SNIPPET_CHARS),
        })?;

    let remote_state = json
        .as_ref()
        .and_then(|v| v.get("state"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let points_awarded = json.as_ref().and_then(|v| {
        v.get("points")
            .and_then(Value::as_f64)
            .or_else(|| v.get("pointsAwarded").and_then(Value::as_f64))
    });

    Ok(SubmissionResult {
        http_status: reply.status,
        success: true,
        state: remote_state
            .as_deref()
            .map(SubmissionState::from_remote)
            .unwrap_or(state),
        remote_state,
        points_awarded,
    })
}

/// Submits completion of the selected task
pub struct TaskSubmitter {
    api: Arc<dyn RewardsApi>,
}

impl TaskSubmitter {
    pub fn new(api: Arc<dyn RewardsApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, credentials: &Credentials, task: &Task) -> Result<SubmissionResult> {
        let request = DoTaskRequest::for_task(task.id.clone());
        let reply = self.api.do_task(credentials, &request).await?;
        let result = classify(&reply)?;

        match result.points_awarded.filter(|p| *p != 0.0) {
            Some(points) => info!(
                status = result.http_status,
                "Submit OK: {} (+{})",
                result.state_label(),
                points
            ),
            None => info!(status = result.http_status, "Submit OK: {}", result.state_label()),
        }
        Ok(result)
    }
}
