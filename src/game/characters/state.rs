// Discrete character states

use std::fmt;
use std::str::FromStr;

/// Horizontal input magnitude above which the hero runs instead of walking
pub const RUN_THRESHOLD: f32 = 0.6;

/// Represents the current state of the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscreteState {
    /// Standing still on ground
    Idle,
    /// Moving slowly on ground
    Walk,
    /// Moving fast on ground
    Run,
    /// Crouching on ground, either held or forced by a hard landing
    Crouch,
    /// In the air, moving upward
    Rise,
    /// In the air, not moving upward
    Fall,
    /// Attack key held
    Attack,
}

impl Default for DiscreteState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DiscreteState {
    /// Every state, in declaration order
    pub const ALL: [DiscreteState; 7] = [
        Self::Idle,
        Self::Walk,
        Self::Run,
        Self::Crouch,
        Self::Rise,
        Self::Fall,
        Self::Attack,
    ];

    /// Check if the state can only occur on the ground
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Idle | Self::Walk | Self::Run | Self::Crouch)
    }

    /// Check if the state can only occur in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Rise | Self::Fall)
    }

    /// Short identifier used by animation configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Crouch => "crouch",
            Self::Rise => "rise",
            Self::Fall => "fall",
            Self::Attack => "attack",
        }
    }

    /// Derive the state for one tick.
    ///
    /// Priority: attack, then crouch (grounded only), then idle/walk/run on
    /// the ground, then rise/fall in the air by the sign of `velocity_y`.
    pub fn derive(
        grounded: bool,
        crouching: bool,
        attacking: bool,
        horizontal: f32,
        velocity_y: f32,
    ) -> Self {
        if attacking {
            return Self::Attack;
        }

        if grounded {
            if crouching {
                Self::Crouch
            } else if horizontal == 0.0 {
                Self::Idle
            } else if horizontal.abs() > RUN_THRESHOLD {
                Self::Run
            } else {
                Self::Walk
            }
        } else if velocity_y > 0.0 {
            Self::Rise
        } else {
            Self::Fall
        }
    }
}

impl fmt::Display for DiscreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown state name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state name: {0}")]
pub struct UnknownStateName(pub String);

impl FromStr for DiscreteState {
    type Err = UnknownStateName;

    /// Parse a state identifier. Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.name() == s)
            .ok_or_else(|| UnknownStateName(s.to_string()))
    }
}
