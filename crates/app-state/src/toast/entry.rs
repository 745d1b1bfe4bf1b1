//! A single toast and its lifecycle
//!
//! An entry moves through `Entering -> Visible -> Dismissing -> Removed`.
//! Every dismissal path (timeout, swipe, close button) funnels through
//! [`ToastEntry::begin_dismiss`], which only succeeds once per entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::task::AbortHandle;

use super::gesture::{
    classify_release, claims_move, DragOffset, GestureRelease, ReleaseOutcome, SwipeDirection,
};

/// Default time-to-live before a toast dismisses itself
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Entrance fade duration
pub const ENTER_DURATION_MS: u64 = 300;

/// Vertical start position of the entrance slide
pub const ENTER_FROM_Y: f32 = -100.0;

/// Duration of every exit animation
pub const EXIT_DURATION_MS: u64 = 200;

/// Vertical target of the default (timeout / close) exit
pub const DEFAULT_EXIT_Y: f32 = -100.0;

/// Vertical target of the swipe-up exit
pub const SWIPE_UP_EXIT_Y: f32 = -150.0;

/// Unique toast identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ToastId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Toast severity
///
/// Only affects the icon and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    #[default]
    Info,
}

impl ToastSeverity {
    /// Icon name for this severity
    pub fn icon(&self) -> &'static str {
        match self {
            ToastSeverity::Success => "check-circle-2",
            ToastSeverity::Error => "x-circle",
            ToastSeverity::Warning => "alert-circle",
            ToastSeverity::Info => "info",
        }
    }
}

/// Why a toast is leaving the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "kebab-case")]
pub enum DismissReason {
    /// The countdown elapsed
    Timeout,
    /// The close button was tapped
    Closed,
    /// Swiped upward
    SwipedUp,
    /// Swiped off to one side
    SwipedSide(SwipeDirection),
}

/// Lifecycle phase of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum ToastPhase {
    /// Entrance animation running
    Entering,
    /// At rest on screen
    Visible,
    /// Exit animation running
    Dismissing {
        /// What triggered the exit
        reason: DismissReason,
    },
    /// Gone from the queue
    Removed,
}

/// Entrance transition parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnterAnimation {
    /// Starting opacity
    pub from_opacity: f32,
    /// Starting vertical translation
    pub from_translate_y: f32,
    /// Fade duration
    pub duration_ms: u64,
}

impl Default for EnterAnimation {
    fn default() -> Self {
        Self { from_opacity: 0.0, from_translate_y: ENTER_FROM_Y, duration_ms: ENTER_DURATION_MS }
    }
}

/// Exit transition parameters
///
/// Targets are absolute; the host animates from the current transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitAnimation {
    /// What triggered the exit
    pub reason: DismissReason,
    /// Target horizontal translation
    pub translate_x: f32,
    /// Target vertical translation
    pub translate_y: f32,
    /// Target opacity
    pub opacity: f32,
    /// Duration of the exit
    pub duration_ms: u64,
}

/// One toast in the queue
#[derive(Debug, Clone)]
pub struct ToastEntry {
    id: ToastId,
    message: String,
    severity: ToastSeverity,
    duration_ms: u64,
    phase: ToastPhase,
    offset: DragOffset,
    dragging: bool,
    timer: Option<AbortHandle>,
}

impl ToastEntry {
    /// Create an entry in the `Entering` phase with a fresh id
    pub fn new(message: impl Into<String>, severity: ToastSeverity, duration_ms: u64) -> Self {
        Self {
            id: ToastId::generate(),
            message: message.into(),
            severity,
            duration_ms,
            phase: ToastPhase::Entering,
            offset: DragOffset::default(),
            dragging: false,
            timer: None,
        }
    }

    /// Entry id
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Display text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity
    pub fn severity(&self) -> ToastSeverity {
        self.severity
    }

    /// Time-to-live in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Current phase
    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Current drag offset
    pub fn offset(&self) -> DragOffset {
        self.offset
    }

    /// The entrance transition to play on mount
    pub fn enter_animation(&self) -> EnterAnimation {
        EnterAnimation::default()
    }

    /// Whether the entry still reacts to input and timers
    pub fn is_active(&self) -> bool {
        matches!(self.phase, ToastPhase::Entering | ToastPhase::Visible)
    }

    /// Whether a countdown task is attached
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Attach the countdown task, aborting any previous one
    pub fn attach_timer(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.timer.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Mark the entrance transition as finished
    ///
    /// Returns `false` if the entry already left `Entering`.
    pub fn finish_entrance(&mut self) -> bool {
        if self.phase == ToastPhase::Entering {
            self.phase = ToastPhase::Visible;
            true
        } else {
            false
        }
    }

    /// Follow a drag update; ignored once dismissal has begun
    ///
    /// The toast only takes over a gesture once it moves past
    /// [`MOVE_CLAIM_THRESHOLD`](super::gesture::MOVE_CLAIM_THRESHOLD) on either
    /// axis. After that every update is followed until release, even moves
    /// back toward the origin.
    pub fn drag(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        if !self.dragging {
            if !claims_move(dx, dy) {
                return false;
            }
            self.dragging = true;
        }
        self.offset.track(dx, dy);
        true
    }

    /// Whether a claimed drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Resolve a drag release
    ///
    /// A swipe starts the matching exit. Anything else springs the offset back
    /// to rest and returns `None`; the countdown keeps running. Releasing a
    /// gesture the toast never claimed does nothing.
    pub fn release(&mut self, release: &GestureRelease, screen_width: f32) -> Option<ExitAnimation> {
        if !self.is_active() || !std::mem::take(&mut self.dragging) {
            return None;
        }

        match classify_release(release) {
            ReleaseOutcome::SwipeUp => self.begin_dismiss(DismissReason::SwipedUp, screen_width),
            ReleaseOutcome::SwipeSide(direction) => {
                self.begin_dismiss(DismissReason::SwipedSide(direction), screen_width)
            }
            ReleaseOutcome::SpringBack => {
                self.offset.reset();
                None
            }
        }
    }

    /// The countdown elapsed
    pub fn expire(&mut self) -> Option<ExitAnimation> {
        // Side exits are the only ones that need the width.
        self.begin_dismiss(DismissReason::Timeout, 0.0)
    }

    /// The close button was tapped
    pub fn close(&mut self) -> Option<ExitAnimation> {
        self.begin_dismiss(DismissReason::Closed, 0.0)
    }

    /// Move to `Dismissing`, cancel the countdown and describe the exit
    ///
    /// Returns `None` when a dismissal is already in progress or done.
    pub fn begin_dismiss(&mut self, reason: DismissReason, screen_width: f32) -> Option<ExitAnimation> {
        if !self.is_active() {
            return None;
        }

        self.phase = ToastPhase::Dismissing { reason };
        self.cancel_timer();

        let (translate_x, translate_y) = match reason {
            DismissReason::Timeout | DismissReason::Closed => (self.offset.x, DEFAULT_EXIT_Y),
            DismissReason::SwipedUp => (self.offset.x, SWIPE_UP_EXIT_Y),
            DismissReason::SwipedSide(direction) => (direction.sign() * screen_width, self.offset.y),
        };

        Some(ExitAnimation {
            reason,
            translate_x,
            translate_y,
            opacity: 0.0,
            duration_ms: EXIT_DURATION_MS,
        })
    }

    /// Terminal transition, taken when the queue drops the entry
    pub(crate) fn mark_removed(&mut self) {
        self.cancel_timer();
        self.phase = ToastPhase::Removed;
    }

    /// Serializable view for the host renderer
    pub fn snapshot(&self) -> ToastSnapshot {
        ToastSnapshot {
            id: self.id.clone(),
            message: self.message.clone(),
            severity: self.severity,
            icon: self.severity.icon().to_string(),
            duration_ms: self.duration_ms,
            phase: self.phase,
            offset: self.offset,
        }
    }
}

/// Render-ready copy of a toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastSnapshot {
    /// Entry id
    pub id: ToastId,
    /// Display text
    pub message: String,
    /// Severity
    pub severity: ToastSeverity,
    /// Icon name
    pub icon: String,
    /// Time-to-live in milliseconds
    pub duration_ms: u64,
    /// Lifecycle phase
    #[serde(flatten)]
    pub phase: ToastPhase,
    /// Drag offset
    pub offset: DragOffset,
}
