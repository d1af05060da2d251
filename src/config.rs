//! Tuning constants for the companion's behavior.
//!
//! Every timing and distance that shapes how the character moves lives in
//! one place. The values are fixed for a release build; `Tuning::default()`
//! is the contract, the struct exists so the engine and tests can share it.

use std::time::Duration;

/// Behavioral constants for the companion.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Sprite edge length in pixels (sprites are square).
    pub size: u32,
    /// Behavior engine tick period (~60 Hz).
    pub tick: Duration,
    /// Distance from the window center to the pointer below which the
    /// companion stops following, in pixels.
    pub follow_radius: f64,
    /// Hard cap on per-tick movement speed, in pixels.
    pub cap_speed: f64,
    /// Proportional gain: speed = min(cap_speed, distance * speed_gain).
    pub speed_gain: f64,
    /// Minimum idle time between two wander hops.
    pub wander_interval: Duration,
    /// Wander offset range per axis: [-wander_range, wander_range] pixels.
    pub wander_range: i32,
    /// Number of sub-steps a wander hop is animated over.
    pub wander_steps: u32,
    /// Delay between two wander sub-steps.
    pub wander_step_delay: Duration,
    /// How long a click-triggered gesture is held.
    pub gesture_hold: Duration,
    /// How long each non-final quote part stays on screen.
    pub quote_part_hold: Duration,
    /// How long the final quote part stays before the overlay is removed.
    pub quote_final_hold: Duration,
    /// Bounds of the random pause between quote sessions.
    pub quote_delay_min: Duration,
    pub quote_delay_max: Duration,
    /// Delimiter splitting one quote into displayed segments.
    pub quote_delimiter: char,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            size: 256,
            tick: Duration::from_millis(16),
            follow_radius: 120.0,
            cap_speed: 6.0,
            speed_gain: 0.1,
            wander_interval: Duration::from_secs(3),
            wander_range: 20,
            wander_steps: 10,
            wander_step_delay: Duration::from_millis(20),
            gesture_hold: Duration::from_millis(400),
            quote_part_hold: Duration::from_millis(2000),
            quote_final_hold: Duration::from_millis(4000),
            quote_delay_min: Duration::from_secs(10),
            quote_delay_max: Duration::from_secs(20),
            quote_delimiter: '-',
        }
    }
}

impl Tuning {
    /// Check internal consistency of the constants.
    ///
    /// Only exercised in debug/startup paths; a default `Tuning` always
    /// passes.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.size == 0 {
            anyhow::bail!("sprite size must be positive");
        }
        if self.follow_radius <= 0.0 {
            anyhow::bail!("follow radius must be positive");
        }
        if self.cap_speed <= 0.0 || self.speed_gain <= 0.0 {
            anyhow::bail!("speed parameters must be positive");
        }
        if self.wander_steps == 0 {
            anyhow::bail!("wander must animate over at least one sub-step");
        }
        if self.quote_delay_min > self.quote_delay_max {
            anyhow::bail!("quote delay bounds are inverted");
        }
        Ok(())
    }

    /// Total wall time a wander hop takes.
    pub fn wander_duration(&self) -> Duration {
        self.wander_step_delay * self.wander_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_values_match_contract() {
        let t = Tuning::default();
        assert_eq!(t.size, 256);
        assert_eq!(t.tick, Duration::from_millis(16));
        assert_eq!(t.follow_radius, 120.0);
        assert_eq!(t.cap_speed, 6.0);
        assert_eq!(t.speed_gain, 0.1);
        assert_eq!(t.gesture_hold, Duration::from_millis(400));
        assert_eq!(t.quote_delimiter, '-');
    }

    #[test]
    fn test_wander_duration() {
        let t = Tuning::default();
        assert_eq!(t.wander_duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let t = Tuning {
            size: 0,
            ..Tuning::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_quote_delay() {
        let t = Tuning {
            quote_delay_min: Duration::from_secs(30),
            quote_delay_max: Duration::from_secs(10),
            ..Tuning::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_wander_steps() {
        let t = Tuning {
            wander_steps: 0,
            ..Tuning::default()
        };
        assert!(t.validate().is_err());
    }
}
