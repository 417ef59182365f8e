// Camera that trails the hero

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Follow settings: where the camera wants to be relative to its target,
/// the box it must stay inside, and how quickly it catches up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraFollow {
    /// Offset from the target position
    pub offset: Vec2,
    /// Lower bound of the camera position
    pub min: Vec2,
    /// Upper bound of the camera position
    pub max: Vec2,
    /// Catch-up rate per second
    pub smoothing: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 2.0),
            min: Vec2::splat(-100.0),
            max: Vec2::splat(100.0),
            smoothing: 5.0,
        }
    }
}

impl CameraFollow {
    /// Position the camera is heading toward for a given target
    pub fn goal(&self, target: Vec2) -> Vec2 {
        (target + self.offset).clamp(self.min, self.max)
    }

    /// Camera position after one tick of following `target`
    pub fn follow(&self, camera: Vec2, target: Vec2, dt: f32) -> Vec2 {
        let t = (self.smoothing * dt).clamp(0.0, 1.0);
        camera.lerp(self.goal(target), t)
    }
}

/// 2D camera position tracked across ticks
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    follow: CameraFollow,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, follow: CameraFollow) -> Self {
        Self { position, follow }
    }

    /// Move toward the target; called once per tick after the hero moved
    pub fn update(&mut self, target: Vec2, dt: f32) {
        self.position = self.follow.follow(self.position, target, dt);
    }

    /// Jump straight to the goal for `target` (e.g. on spawn)
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = self.follow.goal(target);
    }
}
