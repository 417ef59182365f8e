// Character movement through the level
//
// The motion state machine only ever sees a `GroundContact`; how the hero is
// actually moved (a flat test floor, or rapier2d's kinematic character
// controller against static platforms) lives behind `CharacterMover`.

mod mover;
mod world;

pub use mover::{CharacterMover, FlatGround, GroundContact};
pub use world::{KinematicBody, PhysicsWorld};
