//! Drag tracking and release classification for toasts

use serde::{Deserialize, Serialize};

/// Vertical travel (points) past which a release counts as a swipe up
pub const SWIPE_UP_DISTANCE: f32 = -50.0;

/// Vertical velocity past which a release counts as a swipe up
pub const SWIPE_UP_VELOCITY: f32 = -0.5;

/// Horizontal travel (absolute) past which a release counts as a side swipe
pub const SWIPE_SIDE_DISTANCE: f32 = 100.0;

/// Horizontal velocity (absolute) past which a release counts as a side swipe
pub const SWIPE_SIDE_VELOCITY: f32 = 0.5;

/// Movement on either axis needed before a drag is claimed by the toast
pub const MOVE_CLAIM_THRESHOLD: f32 = 5.0;

/// Horizontal direction of a side swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Toward negative x
    Left,
    /// Toward positive x
    Right,
}

impl SwipeDirection {
    /// Sign applied to the off-screen translation
    pub fn sign(&self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Cumulative displacement and velocity at the moment a drag ends
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureRelease {
    /// Horizontal displacement since the drag began
    pub dx: f32,
    /// Vertical displacement since the drag began
    pub dy: f32,
    /// Horizontal velocity (points per ms)
    pub vx: f32,
    /// Vertical velocity (points per ms)
    pub vy: f32,
}

impl GestureRelease {
    /// Create a release with displacement only
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy, vx: 0.0, vy: 0.0 }
    }

    /// Set the release velocity
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}

/// What a drag release resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "kebab-case")]
pub enum ReleaseOutcome {
    /// Dismiss by sliding up
    SwipeUp,
    /// Dismiss by sliding off the side of the screen
    SwipeSide(SwipeDirection),
    /// Return to rest, the toast stays
    SpringBack,
}

/// Classify a drag release
///
/// Upward swipes win over side swipes when both thresholds are met.
pub fn classify_release(release: &GestureRelease) -> ReleaseOutcome {
    if release.dy < SWIPE_UP_DISTANCE || release.vy < SWIPE_UP_VELOCITY {
        ReleaseOutcome::SwipeUp
    } else if release.dx.abs() > SWIPE_SIDE_DISTANCE || release.vx.abs() > SWIPE_SIDE_VELOCITY {
        let direction = if release.dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left };
        ReleaseOutcome::SwipeSide(direction)
    } else {
        ReleaseOutcome::SpringBack
    }
}

/// Whether a move is large enough for the toast to take over the gesture
pub fn claims_move(dx: f32, dy: f32) -> bool {
    dx.abs() > MOVE_CLAIM_THRESHOLD || dy.abs() > MOVE_CLAIM_THRESHOLD
}

/// Live drag offset applied on top of the entrance transform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragOffset {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset, never positive
    pub y: f32,
}

impl DragOffset {
    /// Follow a drag update
    ///
    /// The horizontal offset tracks `dx`. The vertical offset only follows
    /// upward movement and keeps its last value otherwise.
    pub fn track(&mut self, dx: f32, dy: f32) {
        if dy < 0.0 {
            self.y = dy;
        }
        self.x = dx;
    }

    /// Snap back to rest
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether the toast sits at its rest position
    pub fn is_at_rest(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
