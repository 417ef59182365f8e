// Hero character system
//
// This module contains everything that moves the hero:
// - Discrete states and motion tunables
// - Motion state machine producing velocity and events
// - Event bus and effect hooks
// - Controller tying motion, movement and animation together

pub mod controller;
pub mod effects;
pub mod events;
pub mod motion;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use controller::HeroController;
pub use effects::HeroEffects;
pub use events::{EventBus, MotionEvent, SubscriptionId};
pub use motion::{MotionFlags, MotionOutput, MotionStateMachine};
pub use state::{DiscreteState, UnknownStateName};
pub use stats::{MotionTunables, BASE_TUNABLES};
