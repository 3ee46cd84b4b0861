//! Shared fixtures for end-to-end tests against a mock rewards server

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use checkin_core::application::DailyTaskRunner;
use checkin_infra_file::FileCredentialSource;
use checkin_infra_http::{ApiConfig, HttpRewardsApi};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write a credential file for the duration of a test
pub fn credential_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp credential file");
    file.write_all(contents.as_bytes())
        .expect("write temp credential file");
    file.flush().expect("flush temp credential file");
    file
}

/// Runner wired to the real adapters, pointed at `server`
pub fn runner_for(server: &MockServer, env_file: &NamedTempFile) -> DailyTaskRunner {
    let api = HttpRewardsApi::new(ApiConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
        ..ApiConfig::default()
    })
    .expect("build http client");

    DailyTaskRunner::new(
        Arc::new(FileCredentialSource::new(env_file.path())),
        Arc::new(api),
    )
}

pub async fn mount_me(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/social-pay/me"))
        .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
        .mount(server)
        .await;
}

pub async fn mount_tasks(server: &MockServer, tasks: Value) {
    Mock::given(method("GET"))
        .and(path("/challenges/linera/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tasks": tasks })))
        .mount(server)
        .await;
}

pub async fn mount_submit(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/challenges/do-task"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Listing with one weekly task and two daily variants
pub fn sample_tasks() -> Value {
    json!([
        {"id": "weekly", "title": "Weekly Bonus", "displayOrder": 5, "isEnabled": true},
        {"id": "daily-v1", "title": "Daily Check-In", "displayOrder": 2, "isEnabled": true},
        {"id": "daily-v2", "title": "Daily Check-In v2", "displayOrder": 1, "isEnabled": true}
    ])
}
