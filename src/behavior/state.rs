//! The activity state machine.
//!
//! Exactly one activity is current at any time. `Gesturing` and
//! `Presenting` (a quote session) take precedence over motion-driven pose
//! changes: while either is active, movement requests are still honored by
//! the caller but pose requests are dropped, so the gesture sprite stays
//! on screen.
//!
//! Timing is owned by the UI timer queue; the machine only encodes the
//! legal transitions.

use crate::assets::SpriteId;

/// Motion-derived pose requested by the behavior engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Walking,
}

/// What the companion is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Walking,
    /// Click-triggered gesture; ends after a fixed hold unless a quote
    /// session takes over.
    Gesturing,
    /// A quote session is on screen; owns the eventual restore to idle.
    Presenting,
}

/// Transition table for the companion's activity.
#[derive(Debug, Default)]
pub struct ActivityMachine {
    activity: Activity,
}

impl ActivityMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Sprite that should be on screen for the current activity.
    pub fn sprite(&self) -> SpriteId {
        match self.activity {
            Activity::Idle => SpriteId::Idle,
            Activity::Walking => SpriteId::Walk,
            Activity::Gesturing | Activity::Presenting => SpriteId::Gesture,
        }
    }

    /// Whether motion pose requests are currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        matches!(self.activity, Activity::Gesturing | Activity::Presenting)
    }

    /// Apply a motion pose request from the behavior engine.
    ///
    /// Dropped while gesturing or presenting. Returns true when the
    /// activity changed.
    pub fn request_motion(&mut self, motion: Motion) -> bool {
        if self.is_suppressed() {
            return false;
        }
        let next = match motion {
            Motion::Idle => Activity::Idle,
            Motion::Walking => Activity::Walking,
        };
        if self.activity == next {
            false
        } else {
            self.activity = next;
            true
        }
    }

    /// A click landed on the companion.
    ///
    /// Returns true when a new gesture started; false when a gesture or
    /// quote session is already showing (the click is ignored, matching
    /// the single scheduled gesture-end).
    pub fn begin_gesture(&mut self) -> bool {
        if self.is_suppressed() {
            return false;
        }
        self.activity = Activity::Gesturing;
        true
    }

    /// The gesture hold elapsed.
    ///
    /// No-op while a quote session is presenting; the session owns the
    /// restore in that case.
    pub fn end_gesture(&mut self) {
        if self.activity == Activity::Gesturing {
            self.activity = Activity::Idle;
        }
    }

    /// A quote session starts. Allowed from any non-presenting activity,
    /// including mid-gesture (the session subsumes the gesture).
    ///
    /// Returns false when a session is already presenting.
    pub fn begin_presenting(&mut self) -> bool {
        if self.activity == Activity::Presenting {
            return false;
        }
        self.activity = Activity::Presenting;
        true
    }

    /// The quote session finished and its overlay was removed.
    pub fn end_presenting(&mut self) {
        if self.activity == Activity::Presenting {
            self.activity = Activity::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let machine = ActivityMachine::new();
        assert_eq!(machine.activity(), Activity::Idle);
        assert_eq!(machine.sprite(), SpriteId::Idle);
        assert!(!machine.is_suppressed());
    }

    #[test]
    fn test_motion_requests_switch_pose() {
        let mut machine = ActivityMachine::new();
        assert!(machine.request_motion(Motion::Walking));
        assert_eq!(machine.sprite(), SpriteId::Walk);
        assert!(!machine.request_motion(Motion::Walking)); // no change
        assert!(machine.request_motion(Motion::Idle));
        assert_eq!(machine.sprite(), SpriteId::Idle);
    }

    #[test]
    fn test_gesture_takes_precedence_over_motion() {
        let mut machine = ActivityMachine::new();
        assert!(machine.begin_gesture());
        assert_eq!(machine.sprite(), SpriteId::Gesture);

        // Engine keeps ticking; its pose requests must not disturb the
        // gesture sprite.
        assert!(!machine.request_motion(Motion::Walking));
        assert!(!machine.request_motion(Motion::Idle));
        assert_eq!(machine.sprite(), SpriteId::Gesture);

        machine.end_gesture();
        assert_eq!(machine.activity(), Activity::Idle);
    }

    #[test]
    fn test_double_click_starts_single_gesture() {
        let mut machine = ActivityMachine::new();
        assert!(machine.begin_gesture());
        assert!(!machine.begin_gesture());
    }

    #[test]
    fn test_gesture_from_walking_restores_idle() {
        // The original restores the idle image after a gesture regardless
        // of what was showing before.
        let mut machine = ActivityMachine::new();
        machine.request_motion(Motion::Walking);
        machine.begin_gesture();
        machine.end_gesture();
        assert_eq!(machine.activity(), Activity::Idle);
    }

    #[test]
    fn test_presenting_outlives_gesture_end() {
        let mut machine = ActivityMachine::new();
        machine.begin_gesture();
        assert!(machine.begin_presenting());

        // The stale gesture-end deadline fires mid-session; the session
        // owns the restore so nothing changes.
        machine.end_gesture();
        assert_eq!(machine.activity(), Activity::Presenting);
        assert_eq!(machine.sprite(), SpriteId::Gesture);

        machine.end_presenting();
        assert_eq!(machine.activity(), Activity::Idle);
    }

    #[test]
    fn test_presenting_suppresses_motion() {
        let mut machine = ActivityMachine::new();
        machine.begin_presenting();
        assert!(machine.is_suppressed());
        assert!(!machine.request_motion(Motion::Walking));
        assert_eq!(machine.sprite(), SpriteId::Gesture);
    }

    #[test]
    fn test_no_double_presenting() {
        let mut machine = ActivityMachine::new();
        assert!(machine.begin_presenting());
        assert!(!machine.begin_presenting());
    }

    #[test]
    fn test_end_presenting_only_from_presenting() {
        let mut machine = ActivityMachine::new();
        machine.request_motion(Motion::Walking);
        machine.end_presenting();
        assert_eq!(machine.activity(), Activity::Walking);
    }

    #[test]
    fn test_exactly_one_activity() {
        // The enum makes the invariant structural; walk every entry point
        // and confirm the machine lands in a single well-defined activity.
        let mut machine = ActivityMachine::new();
        machine.request_motion(Motion::Walking);
        assert_eq!(machine.activity(), Activity::Walking);
        machine.begin_gesture();
        assert_eq!(machine.activity(), Activity::Gesturing);
        machine.begin_presenting();
        assert_eq!(machine.activity(), Activity::Presenting);
        machine.end_presenting();
        assert_eq!(machine.activity(), Activity::Idle);
    }
}
