//! Pure movement math: the follow speed law, wander hops, and desktop
//! clamping.
//!
//! Nothing here keeps time or touches the window; the engine decides when
//! these run.

use rand::Rng;

use super::Point;
use crate::config::Tuning;

/// Per-tick speed toward the pointer at a given distance.
///
/// Proportional with a hard cap: `min(cap_speed, distance * speed_gain)`.
/// The cap avoids overshoot at long range; the proportional term keeps the
/// approach from crawling once inside the cap distance.
pub fn follow_speed(distance: f64, tuning: &Tuning) -> f64 {
    f64::min(tuning.cap_speed, distance * tuning.speed_gain)
}

/// Compute the follow step for one tick.
///
/// Returns the movement delta toward the pointer, or `None` when the
/// pointer is within the follow radius of the window center.
pub fn follow_step(center: Point, pointer: Point, tuning: &Tuning) -> Option<(i32, i32)> {
    let distance = center.distance_to(pointer);
    if distance <= tuning.follow_radius {
        return None;
    }

    let speed = follow_speed(distance, tuning);
    let dx = f64::from(pointer.x - center.x) / distance * speed;
    let dy = f64::from(pointer.y - center.y) / distance * speed;
    Some((dx.round() as i32, dy.round() as i32))
}

/// Clamp a window top-left position to the visible desktop, leaving the
/// whole sprite on screen.
pub fn clamp_to_desktop(pos: Point, desktop: (u32, u32), sprite: u32) -> Point {
    let max_x = (desktop.0.saturating_sub(sprite)) as i32;
    let max_y = (desktop.1.saturating_sub(sprite)) as i32;
    Point::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
}

/// A small idle-time wander: a short hop to a random nearby position,
/// animated over a fixed number of sub-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WanderPlan {
    from: Point,
    to: Point,
    steps: u32,
}

impl WanderPlan {
    /// Plan a hop from `origin` to a random offset in
    /// `[-wander_range, wander_range]` on each axis, clamped to the desktop.
    pub fn random<R: Rng>(
        origin: Point,
        desktop: (u32, u32),
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let range = tuning.wander_range;
        let target = Point::new(
            origin.x + rng.gen_range(-range..=range),
            origin.y + rng.gen_range(-range..=range),
        );
        Self {
            from: origin,
            to: clamp_to_desktop(target, desktop, tuning.size),
            steps: tuning.wander_steps,
        }
    }

    /// Plan a fixed hop (used by tests).
    pub fn between(from: Point, to: Point, steps: u32) -> Self {
        Self { from, to, steps }
    }

    /// Position after `step` of `steps` sub-steps (linear interpolation).
    ///
    /// `step == 0` is the origin; `step >= steps` is the destination.
    pub fn position_at(&self, step: u32) -> Point {
        if step >= self.steps {
            return self.to;
        }
        let t = f64::from(step) / f64::from(self.steps);
        Point::new(
            self.from.x + (f64::from(self.to.x - self.from.x) * t).round() as i32,
            self.from.y + (f64::from(self.to.y - self.from.y) * t).round() as i32,
        )
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn destination(&self) -> Point {
        self.to
    }
}
