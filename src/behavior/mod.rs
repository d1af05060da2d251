//! The behavior engine: pointer-following, wandering, and the activity
//! state machine.
//!
//! The engine runs on its own ~60 Hz thread and never touches the window.
//! Each tick it reads a published snapshot of the environment and emits
//! typed commands; the UI loop owns the surface and applies them.

pub mod engine;
pub mod motion;
pub mod state;

pub use engine::{BehaviorEngine, EnvSnapshot};
pub use state::{Activity, ActivityMachine, Motion};

use crate::assets::SpriteId;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

/// A state-change request sent from a background thread to the UI loop.
///
/// The UI loop is the only consumer; it applies commands through the
/// activity machine so gesture/quote precedence is enforced in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Move the window to an absolute top-left position.
    Move(Point),
    /// Ask for the idle or walking pose (filtered while gesturing).
    RequestPose(Motion),
    /// Begin a quote session with the given raw quote text.
    StartQuote(String),
}

impl Motion {
    /// Sprite shown for a motion pose.
    pub const fn sprite(self) -> SpriteId {
        match self {
            Self::Idle => SpriteId::Idle,
            Self::Walking => SpriteId::Walk,
        }
    }
}
