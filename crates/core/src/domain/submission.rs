// Submission - request and classified outcome of `do-task`

use serde::Serialize;
use std::fmt;

/// Body of the `do-task` request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoTaskRequest {
    pub task_guid: String,
    pub extra_arguments: Vec<serde_json::Value>,
}

impl DoTaskRequest {
    pub fn for_task(task_id: impl Into<String>) -> Self {
        Self {
            task_guid: task_id.into(),
            extra_arguments: Vec::new(),
        }
    }
}

/// Claim state reported for a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Ok,
    AlreadyClaimed,
    Unknown,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Ok => "OK",
            SubmissionState::AlreadyClaimed => "ALREADY_CLAIMED",
            SubmissionState::Unknown => "UNKNOWN",
        }
    }

    /// Map a `state` string sent by the remote
    pub fn from_remote(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "OK" => SubmissionState::Ok,
            "ALREADY_CLAIMED" => SubmissionState::AlreadyClaimed,
            _ => SubmissionState::Unknown,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of a submission (never persisted)
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub http_status: u16,
    pub success: bool,
    pub state: SubmissionState,
    /// Raw `state` string when the remote sent one
    pub remote_state: Option<String>,
    pub points_awarded: Option<f64>,
}

impl SubmissionResult {
    /// State label for logs, preferring the remote's own wording
    pub fn state_label(&self) -> &str {
        self.remote_state
            .as_deref()
            .unwrap_or_else(|| self.state.as_str())
    }
}
