//! Ordered toast queue
//!
//! Entries are kept in insertion order (newest last) and addressed by id.
//! The queue has no opinion about time; [`ToastService`](super::ToastService)
//! drives timers and animations on top of it.

use super::entry::{
    DismissReason, ExitAnimation, ToastEntry, ToastId, ToastSeverity, DEFAULT_TOAST_DURATION_MS,
};
use super::gesture::GestureRelease;

/// Screen width used for side exits when the host has not reported one
pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;

/// Toast queue manager
#[derive(Debug)]
pub struct ToastQueue {
    entries: Vec<ToastEntry>,
    screen_width: f32,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self { entries: Vec::new(), screen_width: DEFAULT_SCREEN_WIDTH }
    }
}

impl ToastQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen width used for side exits
    pub fn with_screen_width(mut self, width: f32) -> Self {
        self.screen_width = width;
        self
    }

    /// Update the screen width (e.g. on rotation)
    pub fn set_screen_width(&mut self, width: f32) {
        self.screen_width = width;
    }

    /// Current screen width
    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    /// Append a toast
    ///
    /// `severity` defaults to info and `duration_ms` to 3000.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        severity: Option<ToastSeverity>,
        duration_ms: Option<u64>,
    ) -> ToastId {
        let mut entry = ToastEntry::new(
            message,
            severity.unwrap_or_default(),
            duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
        );

        // Ids are unique within the queue.
        while self.contains(entry.id()) {
            entry = ToastEntry::new(entry.message().to_string(), entry.severity(), entry.duration_ms());
        }

        let id = entry.id().clone();
        tracing::debug!(toast_id = %id, severity = ?entry.severity(), "toast enqueued");
        self.entries.push(entry);
        id
    }

    /// Append a success toast
    pub fn success(&mut self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Success), duration_ms)
    }

    /// Append an error toast
    pub fn error(&mut self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Error), duration_ms)
    }

    /// Append a warning toast
    pub fn warning(&mut self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Warning), duration_ms)
    }

    /// Append an info toast
    pub fn info(&mut self, message: impl Into<String>, duration_ms: Option<u64>) -> ToastId {
        self.enqueue(message, Some(ToastSeverity::Info), duration_ms)
    }

    /// Remove a toast by id
    ///
    /// Returns `true` if an entry was removed. Unknown ids are a no-op.
    pub fn dismiss(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|e| e.id().as_str() == id) {
            Some(pos) => {
                let mut entry = self.entries.remove(pos);
                entry.mark_removed();
                tracing::debug!(toast_id = %id, "toast removed");
                true
            }
            None => false,
        }
    }

    /// Remove every toast, cancelling pending countdowns
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.mark_removed();
        }
        self.entries.clear();
    }

    /// Check whether an id is queued
    pub fn contains(&self, id: &ToastId) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Look up a toast by id
    pub fn get(&self, id: &str) -> Option<&ToastEntry> {
        self.entries.iter().find(|e| e.id().as_str() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut ToastEntry> {
        self.entries.iter_mut().find(|e| e.id().as_str() == id)
    }

    /// All toasts in display order
    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }

    /// Number of queued toasts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Per-entry transitions
    // =========================================================================

    /// Attach a countdown task to an entry
    ///
    /// If the entry is gone or already dismissing the task is aborted.
    pub fn attach_timer(&mut self, id: &str, handle: tokio::task::AbortHandle) {
        match self.get_mut(id) {
            Some(entry) if entry.is_active() => entry.attach_timer(handle),
            _ => handle.abort(),
        }
    }

    /// Finish an entry's entrance transition
    pub fn finish_entrance(&mut self, id: &str) -> bool {
        self.get_mut(id).map(|e| e.finish_entrance()).unwrap_or(false)
    }

    /// Feed a drag update to an entry
    pub fn drag(&mut self, id: &str, dx: f32, dy: f32) -> bool {
        self.get_mut(id).map(|e| e.drag(dx, dy)).unwrap_or(false)
    }

    /// Feed a drag release to an entry
    pub fn release(&mut self, id: &str, release: &GestureRelease) -> Option<ExitAnimation> {
        let width = self.screen_width;
        let exit = self.get_mut(id)?.release(release, width);
        if let Some(exit) = &exit {
            tracing::debug!(toast_id = %id, reason = ?exit.reason, "toast swiped");
        }
        exit
    }

    /// Start dismissing an entry
    ///
    /// Returns the exit to play, or `None` if the entry is unknown or a
    /// dismissal already started.
    pub fn begin_dismiss(&mut self, id: &str, reason: DismissReason) -> Option<ExitAnimation> {
        let width = self.screen_width;
        let exit = self.get_mut(id)?.begin_dismiss(reason, width);
        if exit.is_some() {
            tracing::debug!(toast_id = %id, ?reason, "toast dismissing");
        }
        exit
    }
}
