//! Tick-driven behavior engine.
//!
//! Runs on its own thread at the configured tick rate. Each tick reads an
//! environment snapshot (pointer, window position, desktop bounds) and
//! emits commands for the UI loop: follow the pointer when it is far,
//! otherwise idle with an occasional small wander hop.

use std::time::Instant;

use rand::Rng;

use super::motion::{clamp_to_desktop, follow_step, WanderPlan};
use super::state::Motion;
use super::{Command, Point};
use crate::config::Tuning;

/// Snapshot of the environment the engine reacts to.
///
/// Published by the UI loop once per frame; the engine never queries the
/// window directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSnapshot {
    /// Global pointer position.
    pub pointer: Point,
    /// Window top-left position.
    pub window: Point,
    /// Visible desktop bounds (width, height).
    pub desktop: (u32, u32),
}

#[derive(Debug, Clone, Copy)]
struct ActiveWander {
    plan: WanderPlan,
    step: u32,
    next_due: Instant,
}

/// The pointer-following behavior engine.
#[derive(Debug)]
pub struct BehaviorEngine {
    tuning: Tuning,
    last_wander: Instant,
    wander: Option<ActiveWander>,
}

impl BehaviorEngine {
    /// Create an engine; `now` seeds the wander cooldown so the companion
    /// does not hop immediately at startup.
    pub fn new(tuning: Tuning, now: Instant) -> Self {
        Self {
            tuning,
            last_wander: now,
            wander: None,
        }
    }

    /// Run one tick and return the commands to apply.
    pub fn tick<R: Rng>(&mut self, env: &EnvSnapshot, now: Instant, rng: &mut R) -> Vec<Command> {
        let mut commands = Vec::new();

        // An in-flight wander hop owns the motion until it finishes.
        if let Some(wander) = &mut self.wander {
            if now >= wander.next_due {
                wander.step += 1;
                let pos = wander.plan.position_at(wander.step);
                commands.push(Command::Move(pos));
                if wander.step >= wander.plan.steps() {
                    self.wander = None;
                    commands.push(Command::RequestPose(Motion::Idle));
                } else {
                    wander.next_due += self.tuning.wander_step_delay;
                    commands.push(Command::RequestPose(Motion::Walking));
                }
            }
            return commands;
        }

        let half = (self.tuning.size / 2) as i32;
        let center = Point::new(env.window.x + half, env.window.y + half);

        if let Some((dx, dy)) = follow_step(center, env.pointer, &self.tuning) {
            let target = clamp_to_desktop(
                Point::new(env.window.x + dx, env.window.y + dy),
                env.desktop,
                self.tuning.size,
            );
            commands.push(Command::Move(target));
            commands.push(Command::RequestPose(Motion::Walking));
        } else if now.saturating_duration_since(self.last_wander) >= self.tuning.wander_interval {
            self.last_wander = now;
            let plan = WanderPlan::random(env.window, env.desktop, &self.tuning, rng);
            self.wander = Some(ActiveWander {
                plan,
                step: 0,
                next_due: now + self.tuning.wander_step_delay,
            });
            commands.push(Command::RequestPose(Motion::Walking));
        } else {
            commands.push(Command::RequestPose(Motion::Idle));
        }

        commands
    }

    /// Whether a wander hop is currently animating.
    pub fn wandering(&self) -> bool {
        self.wander.is_some()
    }
}
