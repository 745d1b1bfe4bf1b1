//! Authentication session state
//!
//! Session objects are issued by the auth backend; this module only holds
//! the current one and tells subscribers when it changes.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User id
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Whether the email address was verified
    #[serde(default)]
    pub email_verified: bool,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Account creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Server-side session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Session id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Session token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
}

/// A user together with their session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Session record
    pub session: SessionInfo,
    /// Session owner
    pub user: SessionUser,
}

impl AuthSession {
    /// Check whether the session has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.session.expires_at <= now
    }

    /// Check whether the session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// What the app currently knows about the session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Not fetched yet
    #[default]
    Pending,
    /// No session
    SignedOut,
    /// Active session
    SignedIn(AuthSession),
}

/// Session state container
pub struct SessionStore {
    state: RwLock<SessionState>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a container in the `Pending` state
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(SessionState::Pending);
        Self { state: RwLock::new(SessionState::Pending), state_tx }
    }

    /// Record the result of a session fetch or sign-in
    ///
    /// Expired sessions are treated as signed out.
    pub fn set_session(&self, session: Option<AuthSession>) {
        let state = match session {
            Some(session) if !session.is_expired() => SessionState::SignedIn(session),
            Some(session) => {
                tracing::debug!(user_id = %session.user.id, "ignoring expired session");
                SessionState::SignedOut
            }
            None => SessionState::SignedOut,
        };
        self.set_state(state);
    }

    /// Drop the current session
    pub fn sign_out(&self) {
        self.set_state(SessionState::SignedOut);
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Current session, if signed in
    pub fn session(&self) -> Option<AuthSession> {
        match &*self.state.read() {
            SessionState::SignedIn(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Check whether the session is still being fetched
    pub fn is_pending(&self) -> bool {
        matches!(*self.state.read(), SessionState::Pending)
    }

    /// Check whether a user is signed in
    pub fn is_signed_in(&self) -> bool {
        matches!(*self.state.read(), SessionState::SignedIn(_))
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write() = state.clone();
        self.state_tx.send_replace(state);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
