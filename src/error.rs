//! Application error types

use thiserror::Error;

/// Errors raised while assembling the app
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration value could not be used
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] storage::KvError),

    /// API client error
    #[error("API error: {0}")]
    Api(#[from] app_core::ApiError),

    /// Auth client error
    #[error("Auth error: {0}")]
    Auth(#[from] app_core::AuthError),

    /// Logging was already initialized
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for application assembly
pub type Result<T> = std::result::Result<T, AppError>;
