// Asset management system
//
// Owns the animation clips the rest of the game refers to by handle.

mod clip;
mod handle;
mod library;

pub use clip::{AnimationClip, ClipDefinition, ClipMarker};
pub use handle::ClipHandle;
pub use library::ClipLibrary;

/// Asset registration errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Invalid clip '{name}': {reason}")]
    InvalidClip { name: String, reason: String },
}
