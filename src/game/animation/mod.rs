// Animation system
//
// Maps hero states to clips and plays them on layered tracks:
// - Catalog of state clips and transition clips
// - Player that inserts transitions and one-shots
// - Sequencer that times queued clips

pub mod catalog;
pub mod player;
pub mod sequencer;

pub use catalog::{AnimationCatalog, AnimationTable, CatalogBuilder, CatalogError};
pub use player::{AnimationPlayer, PlaybackTrack};
pub use sequencer::{ClipEvent, ClipSequencer, FrameData, PlaybackEngine, PlaybackEntry};
