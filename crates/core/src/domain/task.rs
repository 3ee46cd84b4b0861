// Task - one entry of the remote challenge listing

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A task offered by the remote challenge
///
/// Transient: rebuilt from the listing response on every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub task_name: Option<String>,
    pub title: Option<String>,
    pub task_type: Option<String>,
    pub slug: Option<String>,
    pub is_enabled: bool,
    /// `None` sorts after every present value
    pub display_order: Option<f64>,
}

/// Wire shape of a listing entry (camelCase, every field optional)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: Option<Value>,
    task_name: Option<String>,
    title: Option<String>,
    #[serde(rename = "type")]
    task_type: Option<String>,
    slug: Option<String>,
    is_enabled: Option<bool>,
    display_order: Option<f64>,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task_name: None,
            title: None,
            task_type: None,
            slug: None,
            is_enabled: true,
            display_order: None,
        }
    }

    /// Text matched against the daily/check-in pattern
    pub fn match_text(&self) -> String {
        [&self.task_name, &self.title, &self.task_type, &self.slug]
            .iter()
            .map(|field| field.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human label for logs: title, then task name, then id
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.task_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.id)
    }

    /// Parse the `tasks` array of a listing body
    ///
    /// A body that is not JSON, or has no `tasks` array, yields an empty list.
    /// Entries without an id or with mistyped fields are skipped.
    pub fn list_from_json(body: &str) -> Vec<Task> {
        let Ok(root) = serde_json::from_str::<Value>(body) else {
            debug!("Task listing body is not JSON");
            return Vec::new();
        };

        let Some(items) = root.get("tasks").and_then(Value::as_array) else {
            debug!("Task listing has no tasks array");
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match RawTask::deserialize(item) {
                Ok(raw) => Task::from_raw(raw),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed task entry");
                    None
                }
            })
            .collect()
    }

    fn from_raw(raw: RawTask) -> Option<Task> {
        let id = match raw.id? {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        Some(Task {
            id,
            task_name: raw.task_name,
            title: raw.title,
            task_type: raw.task_type,
            slug: raw.slug,
            is_enabled: raw.is_enabled != Some(false),
            display_order: raw.display_order,
        })
    }
}
