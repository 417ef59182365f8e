// Hero motion state machine
//
// Turns one tick of input and ground contact into a velocity, a discrete
// state and the movement events of that tick. Collision, rendering and
// animation live elsewhere; this only does the arithmetic.

use super::events::MotionEvent;
use super::state::{DiscreteState, RUN_THRESHOLD};
use super::stats::MotionTunables;
use crate::engine::game_loop::FrameTime;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::GroundContact;
use glam::Vec2;

/// Vertical axis value below which a grounded hero crouches
pub const CROUCH_THRESHOLD: f32 = -0.5;

/// Decisions taken during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionFlags {
    pub crouch: bool,
    pub attack: bool,
    pub jump: bool,
    pub jump_interrupt: bool,
    pub landed: bool,
    pub hard_land: bool,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct MotionOutput {
    /// Velocity to move by this tick (units/second)
    pub velocity: Vec2,
    pub state: DiscreteState,
    /// Whether `state` differs from the previous tick's
    pub state_changed: bool,
    pub flags: MotionFlags,
    /// Jump, then Land or HardLand, then StateChanged
    pub events: Vec<MotionEvent>,
}

/// Owns the hero's velocity, timers and discrete state
#[derive(Debug, Clone)]
pub struct MotionStateMachine {
    tunables: MotionTunables,
    velocity: Vec2,
    /// State of the last tick, None before the first one
    state: Option<DiscreteState>,
    /// Until then, releasing jump cuts the jump short
    minimum_jump_end: f32,
    /// Until then, the hero stays crouched after a hard landing
    force_crouch_end: f32,
    was_grounded: bool,
}

impl Default for MotionStateMachine {
    fn default() -> Self {
        Self::new(MotionTunables::default())
    }
}

impl MotionStateMachine {
    pub fn new(tunables: MotionTunables) -> Self {
        Self {
            tunables,
            velocity: Vec2::ZERO,
            state: None,
            minimum_jump_end: f32::NEG_INFINITY,
            force_crouch_end: f32::NEG_INFINITY,
            was_grounded: false,
        }
    }

    /// Start with the given ground contact, so that spawning on the floor
    /// does not count as a landing
    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.was_grounded = grounded;
        self
    }

    /// Overwrite the velocity (e.g. for knockback or respawn)
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Advance one tick
    pub fn tick(
        &mut self,
        time: FrameTime,
        input: &InputSnapshot,
        contact: GroundContact,
    ) -> MotionOutput {
        let FrameTime { now, dt } = time;
        let grounded = contact.grounded;
        let tunables = self.tunables;

        let mut flags = MotionFlags {
            landed: !self.was_grounded && grounded,
            crouch: (grounded && input.vertical < CROUCH_THRESHOLD) || now < self.force_crouch_end,
            attack: input.attack_held,
            ..MotionFlags::default()
        };

        // Velocity here is still last tick's
        if flags.landed && self.velocity.y.abs() > tunables.force_crouch_velocity {
            flags.hard_land = true;
            flags.crouch = true;
            self.force_crouch_end = now + tunables.force_crouch_duration;
        }

        if !flags.crouch {
            if grounded {
                flags.jump = !flags.attack && input.jump_pressed;
            } else {
                flags.jump_interrupt = input.jump_released && now < self.minimum_jump_end;
            }
        }

        if flags.jump {
            self.velocity.y = tunables.jump_speed;
            self.minimum_jump_end = now + tunables.minimum_jump_duration;
        } else if flags.jump_interrupt && self.velocity.y > 0.0 {
            self.velocity.y *= tunables.jump_interrupt_factor;
        }

        self.velocity.x = 0.0;
        if input.horizontal != 0.0 && !flags.crouch && !(grounded && flags.attack) {
            let speed = if input.horizontal.abs() > RUN_THRESHOLD {
                tunables.run_speed
            } else {
                tunables.walk_speed
            };
            self.velocity.x = speed * input.horizontal.signum();
        }

        if !grounded {
            if self.was_grounded {
                // Just left the ground: drop any downward speed left from
                // standing, skip gravity for this tick
                self.velocity.y = self.velocity.y.max(0.0);
            } else {
                self.velocity.y += tunables.gravity_delta(dt);
            }
        }

        let state = DiscreteState::derive(
            grounded,
            flags.crouch,
            flags.attack,
            input.horizontal,
            self.velocity.y,
        );
        let state_changed = self.state != Some(state);

        let mut events = Vec::with_capacity(3);
        if flags.jump {
            events.push(MotionEvent::Jump);
        }
        if flags.hard_land {
            events.push(MotionEvent::HardLand);
        } else if flags.landed {
            events.push(MotionEvent::Land);
        }
        if state_changed {
            log::debug!(
                "Hero state {} -> {}",
                self.state.map_or("none", |previous| previous.name()),
                state
            );
            events.push(MotionEvent::StateChanged(state));
        }

        log::trace!(
            "t={:.3} grounded={} velocity=({:.2}, {:.2}) {:?}",
            now,
            grounded,
            self.velocity.x,
            self.velocity.y,
            flags
        );

        self.state = Some(state);
        self.was_grounded = grounded;

        MotionOutput {
            velocity: self.velocity,
            state,
            state_changed,
            flags,
            events,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// State of the last tick
    pub fn state(&self) -> Option<DiscreteState> {
        self.state
    }

    /// Ground contact seen on the last tick
    pub fn was_grounded(&self) -> bool {
        self.was_grounded
    }

    pub fn minimum_jump_end(&self) -> f32 {
        self.minimum_jump_end
    }

    pub fn force_crouch_end(&self) -> f32 {
        self.force_crouch_end
    }

    pub fn tunables(&self) -> &MotionTunables {
        &self.tunables
    }
}
