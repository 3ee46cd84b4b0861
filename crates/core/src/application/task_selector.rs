// Task Selector - picks the daily/check-in task from the challenge listing

use crate::application::constants::{FETCH_SNIPPET_CHARS, LISTING_OK_STATUS};
use crate::domain::{Credentials, Task};
use crate::error::{truncate_chars, AppError, Result};
use crate::port::RewardsApi;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// "daily" or "check-in" / "check in" / "checkin" as whole words, any case.
/// Word boundaries are ASCII: a non-ASCII letter next to the word does not
/// join it.
const DAILY_TASK_PATTERN: &str =
    r"(?i)(?-u:\b)daily(?-u:\b)|(?-u:\b)check[- ]?in(?-u:\b)";

fn daily_task_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DAILY_TASK_PATTERN).expect("daily task pattern is valid"))
}

/// Missing display order sorts after every present value
fn compare_display_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Pick the daily task from a listing
///
/// Keeps enabled tasks whose name/title/type/slug match the pattern, then
/// takes the lowest display order. The sort is stable, so ties keep listing
/// order.
pub fn select_daily_task(tasks: &[Task]) -> Option<&Task> {
    let re = daily_task_regex();
    let mut candidates: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_enabled && re.is_match(&t.match_text()))
        .collect();

    candidates.sort_by(|a, b| compare_display_order(a.display_order, b.display_order));
    candidates.first().copied()
}

/// Fetches the listing and applies [`select_daily_task`]
pub struct TaskSelector {
    api: Arc<dyn RewardsApi>,
}

impl TaskSelector {
    pub fn new(api: Arc<dyn RewardsApi>) -> Self {
        Self { api }
    }

    /// Select exactly one daily task
    ///
    /// # Errors
    /// - AppError::Fetch if the listing status is not 200
    /// - AppError::NotFound if nothing matches
    pub async fn select(&self, credentials: &Credentials) -> Result<Task> {
        let reply = self.api.challenge_tasks(credentials).await?;
        if reply.status != LISTING_OK_STATUS {
            return Err(AppError::Fetch {
                status: reply.status,
                snippet: truncate_chars(&reply.body, FETCH_SNIPPET_CHARS),
            });
        }

        let tasks = Task::list_from_json(&reply.body);
        debug!(count = tasks.len(), "Fetched task listing");

        let task = select_daily_task(&tasks).cloned().ok_or(AppError::NotFound {
            candidates: tasks.len(),
        })?;

        info!(
            task_id = %task.id,
            "Daily: {} {}",
            task.display_name(),
            task.id
        );
        Ok(task)
    }
}
