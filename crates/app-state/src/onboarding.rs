//! Onboarding completion state
//!
//! The "seen onboarding" flag lives in the device store under
//! [`keys::ONBOARDING_COMPLETED`]. The store starts out `Loading`; routing
//! decisions must wait for [`OnboardingStore::load`] to report `Ready`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use storage::{keys, DeviceStore};
use tokio::sync::watch;

/// Hydration status of the onboarding flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OnboardingStatus {
    /// The persisted flag has not been read yet
    Loading,
    /// The flag is known
    Ready {
        /// Whether onboarding was completed on this device
        has_seen_onboarding: bool,
    },
}

/// Onboarding state container
pub struct OnboardingStore {
    store: DeviceStore,
    status: RwLock<OnboardingStatus>,
    status_tx: watch::Sender<OnboardingStatus>,
}

impl OnboardingStore {
    /// Create a store in the `Loading` state
    pub fn new(store: DeviceStore) -> Self {
        let (status_tx, _) = watch::channel(OnboardingStatus::Loading);
        Self { store, status: RwLock::new(OnboardingStatus::Loading), status_tx }
    }

    /// Read the persisted flag and move to `Ready`
    ///
    /// Only the first call touches storage. A failed read counts as "not
    /// seen" and is logged.
    pub fn load(&self) -> bool {
        if let OnboardingStatus::Ready { has_seen_onboarding } = *self.status.read() {
            return has_seen_onboarding;
        }

        let seen = match self.store.get::<bool>(keys::ONBOARDING_COMPLETED) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Failed to read onboarding status: {}", e);
                false
            }
        };

        self.set_status(OnboardingStatus::Ready { has_seen_onboarding: seen });
        seen
    }

    /// Mark onboarding as completed
    ///
    /// The in-memory flag only flips once the flag is saved; a failed write is
    /// logged and leaves the status as it was. Returns whether it was saved.
    pub fn complete(&self) -> bool {
        match self.store.set(keys::ONBOARDING_COMPLETED, &true) {
            Ok(()) => {
                self.set_status(OnboardingStatus::Ready { has_seen_onboarding: true });
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save onboarding status: {}", e);
                false
            }
        }
    }

    /// Current status
    pub fn status(&self) -> OnboardingStatus {
        *self.status.read()
    }

    /// Check whether the flag is still being read
    pub fn is_loading(&self) -> bool {
        matches!(self.status(), OnboardingStatus::Loading)
    }

    /// The flag, or `None` while loading
    pub fn has_seen_onboarding(&self) -> Option<bool> {
        match self.status() {
            OnboardingStatus::Loading => None,
            OnboardingStatus::Ready { has_seen_onboarding } => Some(has_seen_onboarding),
        }
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<OnboardingStatus> {
        self.status_tx.subscribe()
    }

    fn set_status(&self, status: OnboardingStatus) {
        *self.status.write() = status;
        self.status_tx.send_replace(status);
    }
}
