// Central Error Type for the Application

use thiserror::Error;

/// Cycle-level error type
///
/// Every variant is local to one cycle: the scheduler logs it and retries
/// after a backoff instead of terminating the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session rejected with HTTP {status} (check DYNAMIC_TOKEN / DEVICE_SIGNATURE)")]
    Auth { status: u16 },

    #[error("Fetch tasks failed: {status} {snippet}")]
    Fetch { status: u16, snippet: String },

    #[error("Daily/check-in task not found among {candidates} task(s)")]
    NotFound { candidates: usize },

    #[error("Submit failed: {status} {snippet}")]
    Submit { status: u16, snippet: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Cut `text` to at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
