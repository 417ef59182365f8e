// Motion tunables shared by every hero

use serde::{Deserialize, Serialize};

/// Fixed tuning values consumed by the motion state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTunables {
    // Moving
    /// Ground speed below the run threshold (units/second)
    pub walk_speed: f32,
    /// Ground speed above the run threshold (units/second)
    pub run_speed: f32,
    /// Vertical gravity acceleration (negative pulls down)
    pub gravity: f32,
    /// Gravity multiplier
    pub gravity_scale: f32,

    // Jumping
    /// Vertical speed set when a jump starts
    pub jump_speed: f32,
    /// Seconds after a jump during which releasing the button cuts it short
    pub minimum_jump_duration: f32,
    /// Factor applied to upward speed when a jump is cut short
    pub jump_interrupt_factor: f32,
    /// Landing speed above which the hero is forced to crouch
    pub force_crouch_velocity: f32,
    /// How long a hard landing keeps the hero crouched (seconds)
    pub force_crouch_duration: f32,
}

/// The stock tuning
pub const BASE_TUNABLES: MotionTunables = MotionTunables {
    walk_speed: 1.5,
    run_speed: 7.0,
    gravity: -9.81,
    gravity_scale: 6.6,

    jump_speed: 25.0,
    minimum_jump_duration: 0.5,
    jump_interrupt_factor: 0.5,
    force_crouch_velocity: 25.0,
    force_crouch_duration: 0.5,
};

impl Default for MotionTunables {
    fn default() -> Self {
        BASE_TUNABLES
    }
}

impl MotionTunables {
    /// Vertical velocity change from gravity over `dt`
    pub fn gravity_delta(&self, dt: f32) -> f32 {
        self.gravity * self.gravity_scale * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_tunables() {
        let tunables = MotionTunables::default();
        assert_eq!(tunables.walk_speed, 1.5);
        assert_eq!(tunables.run_speed, 7.0);
        assert_eq!(tunables.jump_speed, 25.0);
    }

    #[test]
    fn test_gravity_delta() {
        let tunables = MotionTunables::default();
        assert_relative_eq!(tunables.gravity_delta(0.1), -9.81 * 6.6 * 0.1, epsilon = 1e-5);
        assert_eq!(tunables.gravity_delta(0.0), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tunables: MotionTunables = serde_json::from_str(r#"{ "run_speed": 9.0 }"#).unwrap();
        assert_eq!(tunables.run_speed, 9.0);
        assert_eq!(tunables.walk_speed, BASE_TUNABLES.walk_speed);
    }
}
