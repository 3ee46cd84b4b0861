// Rewards API client over reqwest
// reason: async-trait for the RewardsApi port
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, ORIGIN};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

use checkin_core::domain::{Credentials, DoTaskRequest};
use checkin_core::port::{HttpReply, RewardsApi};
use checkin_core::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://linera-api.pulsar.money/api/v1/pulsar";
pub const DEFAULT_ORIGIN: &str = "https://portal.linera.net";
pub const DEFAULT_CHALLENGE: &str = "linera/1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const X_DYNAMIC_TOKEN: &str = "x-dynamic-token";
const X_ACCESS_TOKEN: &str = "x-access-token";
const X_DEVICE_SIGNATURE: &str = "x-device-signature";

/// Remote endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub origin: String,
    /// Challenge path segment, e.g. `linera/1`
    pub challenge: String,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            challenge: DEFAULT_CHALLENGE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// RewardsApi backed by a single reused reqwest client
pub struct HttpRewardsApi {
    client: Client,
    config: ApiConfig,
}

impl HttpRewardsApi {
    /// Build the client
    ///
    /// # Errors
    /// - AppError::Config if the origin is not a valid header value
    /// - AppError::Transport if the TLS backend cannot be initialised
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT, HeaderValue::from_static("application/json"));
        defaults.insert(
            ORIGIN,
            HeaderValue::from_str(&config.origin)
                .map_err(|e| AppError::Config(format!("invalid origin: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(defaults)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Credential headers shared by every call
    fn credential_headers(credentials: &Credentials) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(X_DYNAMIC_TOKEN, header_value(credentials.dynamic_token())?);
        if let Some(token) = credentials.access_token() {
            headers.insert(X_ACCESS_TOKEN, header_value(token)?);
        }
        if let Some(signature) = credentials.device_signature() {
            headers.insert(X_DEVICE_SIGNATURE, header_value(signature)?);
        }
        Ok(headers)
    }

    async fn send(request: RequestBuilder) -> Result<HttpReply> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read body: {}", e)))?;

        debug!(status, bytes = body.len(), "Remote reply");
        Ok(HttpReply { status, body })
    }

    async fn get_uncached(&self, path: &str, credentials: &Credentials) -> Result<HttpReply> {
        let request = self
            .client
            .get(self.url(path))
            .headers(Self::credential_headers(credentials)?)
            .header(CACHE_CONTROL, "no-cache");
        Self::send(request).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| AppError::Config("credential contains characters not allowed in a header".into()))
}

#[async_trait]
impl RewardsApi for HttpRewardsApi {
    async fn current_user(&self, credentials: &Credentials) -> Result<HttpReply> {
        self.get_uncached("social-pay/me", credentials).await
    }

    async fn challenge_tasks(&self, credentials: &Credentials) -> Result<HttpReply> {
        let path = format!("challenges/{}", self.config.challenge);
        self.get_uncached(&path, credentials).await
    }

    async fn do_task(
        &self,
        credentials: &Credentials,
        request: &DoTaskRequest,
    ) -> Result<HttpReply> {
        let request = self
            .client
            .post(self.url("challenges/do-task"))
            .headers(Self::credential_headers(credentials)?)
            .json(request);
        Self::send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpRewardsApi {
        HttpRewardsApi::new(ApiConfig {
            base_url: server.uri(),
            origin: "https://portal.example".to_string(),
            challenge: "linera/1".to_string(),
            request_timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn full_creds() -> Credentials {
        Credentials::new("dyn", Some("acc".into()), Some("sig".into())).unwrap()
    }

    #[tokio::test]
    async fn test_current_user_sends_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social-pay/me"))
            .and(header("accept", "application/json"))
            .and(header("origin", "https://portal.example"))
            .and(header("x-dynamic-token", "dyn"))
            .and(header("x-access-token", "acc"))
            .and(header("x-device-signature", "sig"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api_for(&server).current_user(&full_creds()).await.unwrap();
        assert_eq!(reply.status, 200);
    }

    #[tokio::test]
    async fn test_optional_headers_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social-pay/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let creds = Credentials::new("dyn", None, None).unwrap();
        let reply = api_for(&server).current_user(&creds).await.unwrap();
        assert_eq!(reply.status, 401);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("x-access-token").is_none());
        assert!(requests[0].headers.get("x-device-signature").is_none());
    }

    #[tokio::test]
    async fn test_challenge_tasks_path_and_body() {
        let server = MockServer::start().await;
        let listing = json!({"tasks": [{"id": "t1", "title": "Daily Check-In"}]});
        Mock::given(method("GET"))
            .and(path("/challenges/linera/1"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing.clone()))
            .mount(&server)
            .await;

        let reply = api_for(&server)
            .challenge_tasks(&full_creds())
            .await
            .unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&reply.body).unwrap(),
            listing
        );
    }

    #[tokio::test]
    async fn test_do_task_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/challenges/do-task"))
            .and(header("content-type", "application/json"))
            .and(header("x-dynamic-token", "dyn"))
            .and(body_json(json!({"taskGuid": "t1", "extraArguments": []})))
            .respond_with(ResponseTemplate::new(400).set_body_string("Task already claimed"))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api_for(&server)
            .do_task(&full_creds(), &DoTaskRequest::for_task("t1"))
            .await
            .unwrap();
        assert_eq!(reply, HttpReply::new(400, "Task already claimed"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social-pay/me"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = HttpRewardsApi::new(ApiConfig {
            base_url: format!("{}/", server.uri()),
            ..ApiConfig::default()
        })
        .unwrap();
        let reply = api.current_user(&full_creds()).await.unwrap();
        assert_eq!(reply.status, 204);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let api = HttpRewardsApi::new(ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(2),
            ..ApiConfig::default()
        })
        .unwrap();

        let result = api.current_user(&full_creds()).await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_invalid_token_characters() {
        let server = MockServer::start().await;
        let creds = Credentials::new("bad\ntoken", None, None).unwrap();

        let result = api_for(&server).current_user(&creds).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
