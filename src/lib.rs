//! Mobile starter core
//!
//! Headless state and logic for a mobile app starter: theming, toasts,
//! onboarding, email/password auth, push registration and navigation. This
//! crate assembles the workspace crates into an [`App`].
//!
//! ```no_run
//! use mobile_starter::{logging, App, AppConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! logging::init(&config.log_filter)?;
//! let app = App::new(config)?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{App, StartupReport};
pub use config::AppConfig;
pub use error::{AppError, Result};
