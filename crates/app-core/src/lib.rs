//! Core services for the mobile starter
//!
//! HTTP clients for the auth backend and the app's REST API, the shared
//! session cookie jar, form validation and push notification registration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod auth;
pub mod cookies;
pub mod push;
pub mod validation;

pub use api::{ApiClient, ApiConfig, ApiError, HttpMethod};
pub use auth::{
    AuthClient, AuthConfig, AuthError, AuthResponse, HttpAuthClient, SignInRequest, SignUpRequest,
};
pub use cookies::SessionCookies;
pub use push::{
    register_for_push_notifications, NotificationChannel, OsKind, PermissionStatus, PushError,
    PushPlatform,
};
pub use validation::{FormErrors, FormField, SignInForm, SignUpForm};
