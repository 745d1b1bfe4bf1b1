//! Toast notifications
//!
//! - [`gesture`]: drag tracking and swipe classification
//! - [`entry`]: per-toast state machine
//! - [`queue`]: ordered queue addressed by id
//! - [`service`]: tokio-driven runtime hosts talk to

pub mod entry;
pub mod gesture;
pub mod queue;
pub mod service;

pub use entry::{
    DismissReason, EnterAnimation, ExitAnimation, ToastEntry, ToastId, ToastPhase, ToastSeverity,
    ToastSnapshot, DEFAULT_TOAST_DURATION_MS,
};
pub use gesture::{classify_release, DragOffset, GestureRelease, ReleaseOutcome, SwipeDirection};
pub use queue::ToastQueue;
pub use service::{ToastEvent, ToastService};
