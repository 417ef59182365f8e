// Input handling system
//
// Devices are not handled here. Whatever reads the keyboard or gamepad hands
// over held-button samples; `InputSampler` turns those into the per-tick
// `InputSnapshot` the motion state machine consumes, with jump press and
// release edges already derived.

pub mod snapshot;

// Re-export commonly used types
pub use snapshot::{HeldInput, InputSampler, InputSnapshot};
