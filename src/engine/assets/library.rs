// Central clip storage

use super::{AnimationClip, AssetError, ClipDefinition, ClipHandle};
use std::collections::HashMap;

/// Owns every animation clip and hands out handles to them
///
/// Clips are registered once during setup. Everything else (catalog, tracks,
/// sequencer) only holds [`ClipHandle`]s.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    /// Registered clips, indexed by handle
    clips: Vec<AnimationClip>,

    /// Name to handle mapping
    clip_names: HashMap<String, ClipHandle>,
}

impl ClipLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from serialized clip definitions
    pub fn from_definitions(definitions: &[ClipDefinition]) -> Result<Self, AssetError> {
        let mut library = Self::new();
        for definition in definitions {
            library.register(definition.to_clip())?;
        }
        Ok(library)
    }

    /// Register a clip and return its handle
    ///
    /// A clip is only accepted once it is playable: at least one frame and a
    /// positive frame duration. Markers must fall within the clip.
    pub fn register(&mut self, mut clip: AnimationClip) -> Result<ClipHandle, AssetError> {
        if self.clip_names.contains_key(&clip.name) {
            return Err(AssetError::AlreadyLoaded(clip.name));
        }
        if clip.frame_count == 0 {
            return Err(AssetError::InvalidClip {
                name: clip.name,
                reason: "clip has no frames".to_string(),
            });
        }
        if clip.frame_duration <= 0.0 || !clip.frame_duration.is_finite() {
            return Err(AssetError::InvalidClip {
                name: clip.name,
                reason: format!("invalid frame duration {}", clip.frame_duration),
            });
        }
        let duration = clip.total_duration();
        if let Some(marker) = clip
            .markers
            .iter()
            .find(|marker| !(0.0..=duration).contains(&marker.time))
        {
            return Err(AssetError::InvalidClip {
                reason: format!(
                    "marker '{}' at {}s is outside 0..={}s",
                    marker.name, marker.time, duration
                ),
                name: clip.name,
            });
        }
        clip.markers.sort_by(|a, b| a.time.total_cmp(&b.time));

        let handle = ClipHandle::from_index(self.clips.len());
        log::debug!("Registered clip '{}' as {}", clip.name, handle);
        self.clip_names.insert(clip.name.clone(), handle);
        self.clips.push(clip);
        Ok(handle)
    }

    /// Get a clip by handle
    pub fn get(&self, handle: ClipHandle) -> Option<&AnimationClip> {
        self.clips.get(handle.index())
    }

    /// Get the handle registered under a name
    pub fn handle(&self, name: &str) -> Option<ClipHandle> {
        self.clip_names.get(name).copied()
    }

    /// Check if a handle refers to a registered clip
    pub fn contains(&self, handle: ClipHandle) -> bool {
        handle.index() < self.clips.len()
    }

    /// Name of a clip, for logging
    pub fn name(&self, handle: ClipHandle) -> &str {
        self.get(handle).map(|clip| clip.name.as_str()).unwrap_or("<unknown>")
    }

    /// Get the number of registered clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
