//! Authentication client
//!
//! Email/password sign-in, sign-up and sign-out against a better-auth style
//! backend. The session is carried by cookies, which are persisted in the
//! secure store so they survive restarts and can be replayed by
//! [`ApiClient`](crate::api::ApiClient).

use app_state::session::{AuthSession, SessionUser};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response as ReqwestResponse};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use storage::{DeviceStore, SecureStore};
use thiserror::Error;

use crate::cookies::SessionCookies;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the request
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Machine-readable code, e.g. `INVALID_EMAIL_OR_PASSWORD`
        code: Option<String>,
        /// Human-readable message, possibly empty
        message: String,
    },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Unexpected response body
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// The server-provided message, when the backend answered with one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthError::Rejected { message, .. } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the backend answered (as opposed to a transport or decode failure)
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Rejected { .. })
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Email sign-in parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignInRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Route the backend should redirect to after success
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Email sign-up parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpRequest {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Route the backend should redirect to after success
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Successful sign-in / sign-up response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token, when the backend returns one
    #[serde(default)]
    pub token: Option<String>,
    /// Signed-in user
    pub user: SessionUser,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Authentication backend
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Sign in with email and password
    async fn sign_in_email(&self, request: SignInRequest) -> Result<AuthResponse>;

    /// Create an account with email and password
    async fn sign_up_email(&self, request: SignUpRequest) -> Result<AuthResponse>;

    /// End the current session
    async fn sign_out(&self) -> Result<()>;

    /// Fetch the current session, `None` when signed out
    async fn get_session(&self) -> Result<Option<AuthSession>>;

    /// Session cookie header for other clients to replay
    fn cookie(&self) -> Option<String>;
}

/// Auth client configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Backend base URL
    pub base_url: String,
    /// App URL scheme, sent as the request origin
    pub scheme: String,
    /// Prefix for keys in the secure store
    pub storage_prefix: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            scheme: "starter".to_string(),
            storage_prefix: "starter".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AuthConfig {
    /// Create a config for a backend URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the app URL scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the storage prefix
    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of [`AuthClient`]
#[derive(Clone)]
pub struct HttpAuthClient {
    client: ReqwestClient,
    config: AuthConfig,
    cookies: SessionCookies,
}

impl HttpAuthClient {
    /// Create a client persisting cookies in `store`
    pub fn new(config: AuthConfig, store: Arc<dyn SecureStore>) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;
        let cookies = SessionCookies::new(DeviceStore::with_scope(store, config.storage_prefix.clone()));

        Ok(Self { client, config, cookies })
    }

    /// The cookie jar, for sharing with [`ApiClient`](crate::api::ApiClient)
    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// Client configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/auth{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, mut req: RequestBuilder) -> Result<ReqwestResponse> {
        req = req.header("expo-origin", format!("{}://", self.config.scheme));
        if let Some(cookie) = self.cookies.header() {
            req = req.header("Cookie", cookie);
        }

        let response = req.send().await?;

        self.cookies.absorb(
            response
                .headers()
                .get_all(reqwest::header::SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        tracing::debug!(status = status.as_u16(), code = ?body.code, "auth request rejected");

        Err(AuthError::Rejected {
            status: status.as_u16(),
            code: body.code,
            message: body.message.unwrap_or_default(),
        })
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.client.post(self.url(path)).json(body);
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn sign_in_email(&self, request: SignInRequest) -> Result<AuthResponse> {
        self.post_json("/sign-in/email", &request).await
    }

    async fn sign_up_email(&self, request: SignUpRequest) -> Result<AuthResponse> {
        self.post_json("/sign-up/email", &request).await
    }

    async fn sign_out(&self) -> Result<()> {
        let req = self.client.post(self.url("/sign-out")).json(&serde_json::json!({}));
        let result = self.send(req).await.map(|_| ());
        // Local sign-out always succeeds.
        self.cookies.clear();
        result
    }

    async fn get_session(&self) -> Result<Option<AuthSession>> {
        let req = self.client.get(self.url("/get-session"));
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_slice::<Option<AuthSession>>(&bytes)?)
    }

    fn cookie(&self) -> Option<String> {
        self.cookies.header()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::KvStore;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> (Arc<KvStore>, HttpAuthClient) {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        let client = HttpAuthClient::new(
            AuthConfig::new(server.uri()).with_scheme("starter").with_storage_prefix("starter"),
            kv.clone(),
        )
        .unwrap();
        (kv, client)
    }

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "u1",
            "email": "alice@example.com",
            "name": "Alice",
            "emailVerified": false
        })
    }

    #[tokio::test]
    async fn test_sign_in_stores_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in/email"))
            .and(header("expo-origin", "starter://"))
            .and(body_json(serde_json::json!({
                "email": "alice@example.com",
                "password": "password123",
                "callbackURL": "/(demo)"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "better-auth.session_token=abc; Path=/; HttpOnly")
                    .set_body_json(serde_json::json!({ "token": "abc", "user": user_json() })),
            )
            .mount(&server)
            .await;

        let (kv, client) = client(&server);
        let response = client
            .sign_in_email(SignInRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
                callback_url: Some("/(demo)".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.user.name, "Alice");
        assert_eq!(client.cookie().as_deref(), Some("better-auth.session_token=abc"));
        assert!(kv.get_item("starter:cookie").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sign_in_rejected_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in/email"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": "INVALID_EMAIL_OR_PASSWORD",
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let (_, client) = client(&server);
        let err = client
            .sign_in_email(SignInRequest {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
                callback_url: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.server_message(), Some("Invalid email or password"));
        assert!(matches!(err, AuthError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_rejection_without_body_has_no_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-up/email"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let (_, client) = client(&server);
        let err = client
            .sign_up_email(SignUpRequest {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "password123".to_string(),
                callback_url: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn test_get_session_replays_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .and(header("Cookie", "better-auth.session_token=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session": {
                    "id": "s1",
                    "userId": "u1",
                    "expiresAt": "2030-01-01T00:00:00.000Z"
                },
                "user": user_json()
            })))
            .mount(&server)
            .await;

        let (_, client) = client(&server);
        client.cookies().absorb(["better-auth.session_token=abc; Path=/"]);

        let session = client.get_session().await.unwrap().unwrap();
        assert_eq!(session.user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_session_null_when_signed_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let (_, client) = client(&server);
        assert!(client.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookies_even_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-out"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_, client) = client(&server);
        client.cookies().absorb(["better-auth.session_token=abc"]);

        assert!(client.sign_out().await.is_err());
        assert_eq!(client.cookie(), None);
    }

    #[test]
    fn test_config_builder() {
        let config = AuthConfig::new("https://auth.example.com")
            .with_scheme("myapp")
            .with_storage_prefix("myapp")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://auth.example.com");
        assert_eq!(config.scheme, "myapp");
        assert_eq!(config.storage_prefix, "myapp");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
