//! Toast runtime
//!
//! [`ToastService`] owns a [`ToastQueue`] behind a mutex and drives it with
//! tokio timers: the entrance transition, the per-entry countdown and the
//! exit animation that ends in removal. Hosts render from
//! [`ToastService::subscribe`] and feed gestures and taps back in.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;

use super::entry::{DismissReason, ExitAnimation, ToastId, ToastSeverity, ToastSnapshot, ENTER_DURATION_MS};
use super::gesture::GestureRelease;
use super::queue::ToastQueue;

/// Lifecycle events broadcast by the service
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    /// A toast was appended
    Added(ToastId),
    /// A toast started its exit
    Dismissing {
        /// Toast id
        id: ToastId,
        /// What triggered the exit
        reason: DismissReason,
    },
    /// A toast left the queue
    Removed(ToastId),
}

struct Inner {
    queue: Mutex<ToastQueue>,
    snapshots: watch::Sender<Vec<ToastSnapshot>>,
    events: broadcast::Sender<ToastEvent>,
}

/// Shared handle to the toast queue and its timers
///
/// Cloning is cheap; all clones drive the same queue. Methods that start
/// timers must be called from within a tokio runtime.
#[derive(Clone)]
pub struct ToastService {
    inner: Arc<Inner>,
}

impl ToastService {
    /// Create a service around an empty queue
    pub fn new() -> Self {
        Self::with_queue(ToastQueue::new())
    }

    /// Create a service around a configured queue
    pub fn with_queue(queue: ToastQueue) -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        let (events, _) = broadcast::channel(64);

        Self { inner: Arc::new(Inner { queue: Mutex::new(queue), snapshots, events }) }
    }

    /// Show a toast
    ///
    /// `severity` defaults to info and `duration_ms` to 3000.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        severity: Option<ToastSeverity>,
        duration_ms: Option<u64>,
    ) -> ToastId {
        let id = {
            let mut queue = self.inner.queue.lock();
            let id = queue.enqueue(message, severity, duration_ms);
            let ttl = queue.get(id.as_str()).map(|e| e.duration_ms()).unwrap_or_default();

            self.spawn_entrance(id.clone());
            let timer = self.spawn_countdown(id.clone(), ttl);
            queue.attach_timer(id.as_str(), timer);
            id
        };

        let _ = self.inner.events.send(ToastEvent::Added(id.clone()));
        self.publish();
        id
    }

    /// Show a success toast
    pub fn success(&self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Success), duration_ms)
    }

    /// Show an error toast
    pub fn error(&self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Error), duration_ms)
    }

    /// Show a warning toast
    pub fn warning(&self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Warning), duration_ms)
    }

    /// Show an info toast
    pub fn info(&self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Info), duration_ms)
    }

    /// Remove a toast immediately, without an exit animation
    ///
    /// Returns `true` if an entry was removed.
    pub fn dismiss(&self, id: &str) -> bool {
        let removed = self.inner.queue.lock().dismiss(id);
        if removed {
            let _ = self.inner.events.send(ToastEvent::Removed(ToastId::from(id)));
            self.publish();
        }
        removed
    }

    /// Close button tapped
    pub fn close(&self, id: &str) -> Option<ExitAnimation> {
        self.begin_exit(id, DismissReason::Closed)
    }

    /// Drag update from the host's gesture recognizer
    ///
    /// Moves too small to claim the gesture are ignored and return `false`.
    pub fn drag(&self, id: &str, dx: f32, dy: f32) -> bool {
        let moved = self.inner.queue.lock().drag(id, dx, dy);
        if moved {
            self.publish();
        }
        moved
    }

    /// Drag released
    ///
    /// Returns the exit animation when the release was a swipe. Otherwise the
    /// toast springs back and stays, with its countdown untouched.
    pub fn release(&self, id: &str, release: &GestureRelease) -> Option<ExitAnimation> {
        let exit = self.inner.queue.lock().release(id, release);
        if let Some(exit) = &exit {
            self.after_exit_started(id, exit);
        }
        self.publish();
        exit
    }

    /// Remove every toast and cancel pending countdowns
    pub fn clear(&self) {
        self.inner.queue.lock().clear();
        self.publish();
    }

    /// Update the screen width used for side exits
    pub fn set_screen_width(&self, width: f32) {
        self.inner.queue.lock().set_screen_width(width);
    }

    /// Current toasts in display order
    pub fn snapshot(&self) -> Vec<ToastSnapshot> {
        self.inner.queue.lock().entries().iter().map(|e| e.snapshot()).collect()
    }

    /// A single toast
    pub fn get(&self, id: &str) -> Option<ToastSnapshot> {
        self.inner.queue.lock().get(id).map(|e| e.snapshot())
    }

    /// Number of toasts
    pub fn len(&self) -> usize {
        self.inner.queue.lock().len()
    }

    /// Check whether no toast is showing
    pub fn is_empty(&self) -> bool {
        self.inner.queue.lock().is_empty()
    }

    /// Subscribe to the rendered toast list
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastSnapshot>> {
        self.inner.snapshots.subscribe()
    }

    /// Subscribe to lifecycle events
    pub fn events(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.events.subscribe()
    }

    // =========================================================================
    // Timers
    // =========================================================================

    fn begin_exit(&self, id: &str, reason: DismissReason) -> Option<ExitAnimation> {
        let exit = self.inner.queue.lock().begin_dismiss(id, reason)?;
        self.after_exit_started(id, &exit);
        self.publish();
        Some(exit)
    }

    fn after_exit_started(&self, id: &str, exit: &ExitAnimation) {
        let id = ToastId::from(id);
        let _ = self
            .inner
            .events
            .send(ToastEvent::Dismissing { id: id.clone(), reason: exit.reason });
        self.spawn_removal(id, exit.duration_ms);
    }

    fn spawn_entrance(&self, id: ToastId) {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ENTER_DURATION_MS)).await;
            if service.inner.queue.lock().finish_entrance(id.as_str()) {
                service.publish();
            }
        });
    }

    fn spawn_countdown(&self, id: ToastId, ttl_ms: u64) -> AbortHandle {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ttl_ms)).await;
            // No-op if a swipe or tap got there first.
            service.begin_exit(id.as_str(), DismissReason::Timeout);
        })
        .abort_handle()
    }

    fn spawn_removal(&self, id: ToastId, after_ms: u64) {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(after_ms)).await;
            if !service.dismiss(id.as_str()) {
                tracing::debug!(toast_id = %id, "toast already removed before its exit finished");
            }
        });
    }

    fn publish(&self) {
        self.inner.snapshots.send_replace(self.snapshot());
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastService").field("len", &self.len()).finish()
    }
}
