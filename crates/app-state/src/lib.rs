//! Application state for the mobile starter
//!
//! This crate holds the in-memory state containers the UI reads from: the
//! toast queue and its runtime, onboarding completion, the auth session and
//! the push token.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod onboarding;
pub mod push_token;
pub mod session;
pub mod toast;

pub use onboarding::{OnboardingStatus, OnboardingStore};
pub use push_token::PushTokenStore;
pub use session::{AuthSession, SessionInfo, SessionState, SessionStore, SessionUser};
pub use toast::{ToastId, ToastService, ToastSeverity};
