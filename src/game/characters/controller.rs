// Per-tick hero orchestration

use super::events::{EventBus, MotionEvent, SubscriptionId};
use super::motion::{MotionOutput, MotionStateMachine};
use super::state::DiscreteState;
use crate::engine::game_loop::FrameTime;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{CharacterMover, GroundContact};
use crate::game::animation::{AnimationPlayer, ClipSequencer, PlaybackEngine};
use glam::Vec2;

/// Wires the motion state machine to a mover and an animation player.
///
/// Each tick: motion decides the velocity from input and the contact the
/// mover reported last tick, the mover applies it and reports the new
/// contact, the animation follows state changes and facing, and finally
/// the tick's events go out on the bus.
#[derive(Debug)]
pub struct HeroController<M, E = ClipSequencer> {
    motion: MotionStateMachine,
    animation: AnimationPlayer<E>,
    mover: M,
    events: EventBus,
    /// Contact reported by the last move
    contact: GroundContact,
    /// Animation layer driven by state changes
    layer: usize,
}

impl<M: CharacterMover, E: PlaybackEngine> HeroController<M, E> {
    /// Build a controller. The mover is checked with a zero move so a hero
    /// spawned on the ground does not land on its first tick.
    pub fn new(motion: MotionStateMachine, animation: AnimationPlayer<E>, mut mover: M) -> Self {
        let contact = mover.move_by(Vec2::ZERO);
        log::debug!(
            "Hero spawned at ({:.2}, {:.2}), grounded: {}",
            mover.position().x,
            mover.position().y,
            contact.grounded
        );

        Self {
            motion: motion.with_grounded(contact.grounded),
            animation,
            mover,
            events: EventBus::new(),
            contact,
            layer: 0,
        }
    }

    /// Drive `layer` instead of layer 0
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    /// Run one tick
    pub fn tick(&mut self, time: FrameTime, input: &InputSnapshot) -> MotionOutput {
        let output = self.motion.tick(time, input, self.contact);

        self.contact = self.mover.move_by(output.velocity * time.dt);

        if output.state_changed {
            self.animation.play_for_state(output.state, self.layer);
        }
        self.animation.set_flip(input.horizontal);

        self.events.dispatch_all(&output.events);
        output
    }

    /// Observe the events of every following tick
    pub fn subscribe(&mut self, handler: impl FnMut(&MotionEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(handler)
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn position(&self) -> Vec2 {
        self.mover.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity()
    }

    pub fn state(&self) -> Option<DiscreteState> {
        self.motion.state()
    }

    pub fn contact(&self) -> GroundContact {
        self.contact
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn motion(&self) -> &MotionStateMachine {
        &self.motion
    }

    pub fn animation(&self) -> &AnimationPlayer<E> {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationPlayer<E> {
        &mut self.animation
    }

    pub fn mover(&self) -> &M {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }
}
