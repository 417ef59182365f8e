// Character movement primitive

use glam::Vec2;

/// Ground contact reported by the collision system for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundContact {
    pub grounded: bool,
}

impl GroundContact {
    pub const GROUNDED: Self = Self { grounded: true };
    pub const AIRBORNE: Self = Self { grounded: false };
}

/// Moves a character through the world.
///
/// `move_by` applies one tick's displacement and reports whether the
/// character ended up standing on something. That contact is what the
/// motion state machine consumes on the following tick.
pub trait CharacterMover {
    /// Move by `delta` and return the resulting ground contact
    fn move_by(&mut self, delta: Vec2) -> GroundContact;

    /// Current character position (feet)
    fn position(&self) -> Vec2;
}

/// An endless horizontal floor at a fixed height
#[derive(Debug, Clone)]
pub struct FlatGround {
    position: Vec2,
    floor_height: f32,
}

impl FlatGround {
    /// Create a floor at `floor_height` with the character at `position`
    pub fn new(floor_height: f32, position: Vec2) -> Self {
        Self {
            position,
            floor_height,
        }
    }

    /// Get the floor height
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }
}

impl CharacterMover for FlatGround {
    fn move_by(&mut self, delta: Vec2) -> GroundContact {
        self.position += delta;

        if self.position.y <= self.floor_height {
            self.position.y = self.floor_height;
            GroundContact::GROUNDED
        } else {
            GroundContact::AIRBORNE
        }
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_still_is_grounded() {
        let mut ground = FlatGround::new(0.0, Vec2::ZERO);
        assert_eq!(ground.move_by(Vec2::ZERO), GroundContact::GROUNDED);
    }

    #[test]
    fn test_moving_up_leaves_ground() {
        let mut ground = FlatGround::new(0.0, Vec2::ZERO);
        assert_eq!(ground.move_by(Vec2::new(0.0, 0.5)), GroundContact::AIRBORNE);
        assert_eq!(ground.position(), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_falling_stops_at_floor() {
        let mut ground = FlatGround::new(1.0, Vec2::new(2.0, 3.0));
        let contact = ground.move_by(Vec2::new(1.0, -10.0));

        assert!(contact.grounded);
        assert_eq!(ground.position(), Vec2::new(3.0, 1.0));
        assert_eq!(ground.floor_height(), 1.0);
    }
}
