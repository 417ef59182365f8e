//! Deterministic 2D platformer hero controller.
//!
//! A motion state machine turns per-tick input and ground contact into
//! velocity, a discrete state and movement events; an animation player maps
//! state changes to clips with optional transition clips in between.

pub mod engine;
pub mod game;
