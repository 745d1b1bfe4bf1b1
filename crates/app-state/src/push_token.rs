//! Push notification token container

use parking_lot::RwLock;
use tokio::sync::watch;

/// Holds the device push token once registration succeeds
///
/// The token is kept in memory only; a fresh one is requested on every launch.
pub struct PushTokenStore {
    token: RwLock<Option<String>>,
    token_tx: watch::Sender<Option<String>>,
}

impl PushTokenStore {
    /// Create an empty container
    pub fn new() -> Self {
        let (token_tx, _) = watch::channel(None);
        Self { token: RwLock::new(None), token_tx }
    }

    /// Store a token, replacing any previous one
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        *self.token.write() = Some(token.clone());
        self.token_tx.send_replace(Some(token));
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Forget the token
    pub fn clear(&self) {
        *self.token.write() = None;
        self.token_tx.send_replace(None);
    }

    /// Subscribe to token changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token_tx.subscribe()
    }
}

impl Default for PushTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_token_lifecycle() {
        let store = PushTokenStore::new();
        let rx = store.subscribe();
        assert_eq!(store.token(), None);

        store.set_token("ExponentPushToken[abc]");
        assert_eq!(store.token().as_deref(), Some("ExponentPushToken[abc]"));
        assert_eq!(rx.borrow().as_deref(), Some("ExponentPushToken[abc]"));

        store.clear();
        assert_eq!(store.token(), None);
    }
}
