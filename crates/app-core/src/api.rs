//! Backend REST API client
//!
//! JSON in, JSON out, with the session cookie attached when one is stored.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::cookies::SessionCookies;

// =============================================================================
// Error Types
// =============================================================================

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("API Error {status} ({status_text}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        status_text: String,
        /// Response body, or `Unknown` when empty
        body: String,
    },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint is appended to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("mobile-starter/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiConfig {
    /// Create a config for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the app's own backend
#[derive(Clone)]
pub struct ApiClient {
    client: ReqwestClient,
    config: ApiConfig,
    cookies: Option<SessionCookies>,
}

impl ApiClient {
    /// Create a client
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config, cookies: None })
    }

    /// Attach the session cookie jar
    pub fn with_cookies(mut self, cookies: SessionCookies) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Send a request
    ///
    /// Returns `None` for `204 No Content`.
    pub async fn request<T>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);

        let mut req = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if let Some(params) = params {
            req = req.query(params);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        req = req.header("Content-Type", "application/json");
        if let Some(cookie) = self.cookies.as_ref().and_then(|jar| jar.header()) {
            req = req.header("Cookie", cookie);
        }

        if let Some(body) = body {
            req = req.body(serde_json::to_vec(&body)?);
        }

        tracing::debug!(method = method.as_str(), %url, "api request");
        let response = req.send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: if text.is_empty() { "Unknown".to_string() } else { text },
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// GET with optional query parameters
    pub async fn get<T>(&self, endpoint: &str, params: Option<&[(&str, &str)]>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.request(HttpMethod::Get, endpoint, None, params).await
    }

    /// POST a JSON body
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, endpoint, Some(serde_json::to_value(body)?), None).await
    }

    /// PUT a JSON body
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, endpoint, Some(serde_json::to_value(body)?), None).await
    }

    /// DELETE
    pub async fn delete<T>(&self, endpoint: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.request(HttpMethod::Delete, endpoint, None, None).await
    }

    /// Client configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;
    use storage::{DeviceStore, KvStore};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::new("https://api.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("Test/1.0")
            .with_header("X-App", "starter");

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "Test/1.0");
        assert_eq!(config.default_headers.get("X-App").map(String::as_str), Some("starter"));
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "API Error 404 (Not Found): missing");
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_get_with_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "name": "seven"
            })))
            .mount(&server)
            .await;

        let item: Option<Item> = client(&server).get("/items", Some(&[("page", "2")][..])).await.unwrap();
        assert_eq!(item, Some(Item { id: 7, name: "seven".to_string() }));
    }

    #[tokio::test]
    async fn test_post_sends_json_and_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notifications/register"))
            .and(header("Cookie", "session=abc"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({ "token": "tok" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = DeviceStore::with_scope(Arc::new(KvStore::in_memory().unwrap()), "starter");
        let cookies = SessionCookies::new(store);
        cookies.absorb(["session=abc; Path=/"]);

        let api = client(&server).with_cookies(cookies);
        let result: Option<serde_json::Value> = api
            .post("/notifications/register", &serde_json::json!({ "token": "tok" }))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client(&server).delete::<serde_json::Value>("/items/1").await.unwrap_err();
        assert_eq!(err.to_string(), "API Error 403 (Forbidden): forbidden");
    }

    #[tokio::test]
    async fn test_error_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .put::<serde_json::Value, _>("/items/1", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref body, .. } if body == "Unknown"));
    }

    #[tokio::test]
    async fn test_no_cookie_header_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(true)))
            .mount(&server)
            .await;

        let pong: Option<bool> = client(&server).get("/ping", None).await.unwrap();
        assert_eq!(pong, Some(true));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("cookie").is_none());
    }
}
