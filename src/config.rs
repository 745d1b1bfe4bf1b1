//! Application configuration
//!
//! Defaults suit a local development backend. [`AppConfig::from_env`]
//! overrides them from `APP_*` environment variables.

use app_core::{ApiConfig, AuthConfig};
use storage::KvConfig;

use crate::error::{AppError, Result};

/// Backend REST API base URL
pub const ENV_API_URL: &str = "APP_API_URL";
/// Auth backend base URL
pub const ENV_BACKEND_URL: &str = "APP_BACKEND_URL";
/// Key-value store directory
pub const ENV_STORAGE_PATH: &str = "APP_STORAGE_PATH";
/// Push project id
pub const ENV_PROJECT_ID: &str = "APP_PROJECT_ID";
/// Default log filter
pub const ENV_LOG: &str = "APP_LOG";

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Device key-value store
    pub storage: KvConfig,
    /// Backend REST API
    pub api: ApiConfig,
    /// Auth backend
    pub auth: AuthConfig,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Push project id; overrides the one the platform reports
    pub project_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: KvConfig::default(),
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            log_filter: "info".to_string(),
            project_id: None,
        }
    }
}

impl AppConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api.base_url = parse_url(ENV_API_URL, url)?;
        }
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            config.auth.base_url = parse_url(ENV_BACKEND_URL, url)?;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            config.storage.path = path;
        }
        if let Some(project_id) = lookup(ENV_PROJECT_ID) {
            config.project_id = Some(project_id);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Set the storage config
    pub fn with_storage(mut self, storage: KvConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Set the API config
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Set the auth config
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Set the push project id
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

fn parse_url(key: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::InvalidConfig { key, value })
    }
}
