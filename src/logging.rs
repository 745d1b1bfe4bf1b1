//! Logging setup

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AppError, Result};

/// Build the filter: `RUST_LOG` when set and valid, otherwise `default`
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber
///
/// Fails if a global subscriber is already set.
pub fn init(default_filter: &str) -> Result<()> {
    fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_falls_back() {
        // Only meaningful when RUST_LOG is unset; either way it must not panic.
        let filter = env_filter("not a [valid filter");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init("warn");
        assert!(matches!(init("warn"), Err(AppError::Logging(_))));
    }
}
