//! Push notification registration
//!
//! The push SDK is a black box behind [`PushPlatform`]. Registration walks
//! the usual mobile sequence: Android channel, device check, permission,
//! project id, token, then hands the token to the backend.

use app_state::push_token::PushTokenStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ApiClient;

/// Backend endpoint receiving push tokens
pub const REGISTER_ENDPOINT: &str = "/notifications/register";

/// Push platform error types
#[derive(Debug, Error)]
pub enum PushError {
    /// The platform SDK reported a failure
    #[error("Push platform error: {0}")]
    Platform(String),

    /// The platform does not support push
    #[error("Push notifications unsupported: {0}")]
    Unsupported(String),
}

/// Result type for push operations
pub type Result<T> = std::result::Result<T, PushError>;

/// Host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    /// Android
    Android,
    /// iOS
    Ios,
    /// Web
    Web,
}

/// Notification permission status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Granted
    Granted,
    /// Explicitly denied
    Denied,
    /// Not asked yet
    Undetermined,
}

impl PermissionStatus {
    /// Check whether notifications may be shown
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Android channel importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelImportance {
    /// Silent
    Low,
    /// Sound
    Default,
    /// Sound and heads-up
    High,
    /// Sound, heads-up and full-screen intents
    Max,
}

/// Android notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    /// Channel id
    pub id: String,
    /// User-visible name
    pub name: String,
    /// Importance
    pub importance: ChannelImportance,
    /// Vibration pattern in ms (wait, vibrate, wait, ...)
    pub vibration_pattern: Vec<u64>,
    /// LED color
    pub light_color: String,
}

impl NotificationChannel {
    /// The app's `default` channel
    pub fn default_channel() -> Self {
        Self {
            id: "default".to_string(),
            name: "default".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#0066FF".to_string(),
        }
    }
}

/// Push notification SDK
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Host operating system
    fn os(&self) -> OsKind;

    /// Whether this is a physical device (simulators cannot receive push)
    fn is_physical_device(&self) -> bool;

    /// Project id configured in the app manifest
    fn project_id(&self) -> Option<String>;

    /// Create or update an Android notification channel
    async fn set_notification_channel(&self, channel: &NotificationChannel) -> Result<()>;

    /// Current permission status
    async fn permission_status(&self) -> Result<PermissionStatus>;

    /// Ask the user for permission
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Obtain a push token for a project
    async fn push_token(&self, project_id: &str) -> Result<String>;

    /// Open the app's page in the system settings
    async fn open_settings(&self) -> Result<()>;
}

/// Register this device for push notifications
///
/// `project_id` overrides the platform's own. Returns the token, or `None`
/// whenever any step fails; `on_denied` runs if the user refuses permission.
/// A failure to save the token on the backend is logged and ignored.
pub async fn register_for_push_notifications<F>(
    platform: &dyn PushPlatform,
    project_id: Option<&str>,
    tokens: &PushTokenStore,
    api: &ApiClient,
    on_denied: F,
) -> Option<String>
where
    F: FnOnce() + Send,
{
    if platform.os() == OsKind::Android {
        if let Err(e) = platform.set_notification_channel(&NotificationChannel::default_channel()).await {
            tracing::warn!("Failed to set notification channel: {}", e);
        }
    }

    if !platform.is_physical_device() {
        tracing::warn!("Push notifications require a physical device");
        return None;
    }

    let mut status = match platform.permission_status().await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("Failed to read notification permission: {}", e);
            return None;
        }
    };

    if !status.is_granted() {
        status = match platform.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Failed to request notification permission: {}", e);
                PermissionStatus::Denied
            }
        };
    }

    if !status.is_granted() {
        tracing::warn!("Permission not granted for push notifications");
        on_denied();
        return None;
    }

    let Some(project_id) = project_id.map(str::to_string).or_else(|| platform.project_id()) else {
        tracing::error!("Push project id not found");
        return None;
    };

    let token = match platform.push_token(&project_id).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Push token error: {}", e);
            return None;
        }
    };

    tokens.set_token(token.clone());

    if let Err(e) = api
        .post::<serde_json::Value, _>(REGISTER_ENDPOINT, &serde_json::json!({ "token": token }))
        .await
    {
        tracing::warn!("Failed to save push token: {}", e);
    }

    Some(token)
}
