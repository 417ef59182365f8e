// State-driven animation playback

use super::catalog::AnimationCatalog;
use super::sequencer::{ClipSequencer, PlaybackEngine};
use crate::engine::assets::ClipHandle;
use crate::game::characters::state::DiscreteState;
use std::collections::HashMap;

/// Per-layer record of the clip the layer is meant to settle on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTrack {
    /// Steady-state clip of the layer, ignoring transitions and one-shots
    pub target: ClipHandle,
}

/// Picks clips for states and hands them to a playback engine, inserting
/// transition clips where the catalog defines them
#[derive(Debug)]
pub struct AnimationPlayer<E = ClipSequencer> {
    catalog: AnimationCatalog,
    engine: E,
    tracks: HashMap<usize, PlaybackTrack>,
    /// Whether the skeleton should be mirrored horizontally
    flip_horizontal: bool,
}

impl<E: PlaybackEngine> AnimationPlayer<E> {
    pub fn new(catalog: AnimationCatalog, engine: E) -> Self {
        Self {
            catalog,
            engine,
            tracks: HashMap::new(),
            flip_horizontal: false,
        }
    }

    /// Play the clip mapped to `state`. States without a clip leave the
    /// layer untouched.
    pub fn play_for_state(&mut self, state: DiscreteState, layer: usize) {
        match self.catalog.resolve(state) {
            Some(clip) => self.play_clip(clip, layer),
            None => log::debug!("No clip mapped for state '{}', keeping current", state),
        }
    }

    /// Switch `layer` to `target`, looping.
    ///
    /// When a transition from the layer's current target to `target` is
    /// registered it plays first, once, and `target` is queued right behind
    /// it. Asking for the clip the layer already targets does nothing.
    pub fn play_clip(&mut self, target: ClipHandle, layer: usize) {
        let current = self.tracks.get(&layer).map(|track| track.target);
        if current == Some(target) {
            log::trace!("Layer {} already targets {}", layer, target);
            return;
        }

        let transition = current.and_then(|from| self.catalog.resolve_transition(from, target));
        match transition {
            Some(transition) => {
                log::debug!("Layer {}: {} via {}", layer, target, transition);
                self.engine.set_clip(layer, transition, false);
                self.engine.queue_clip(layer, target, true, 0.0);
            }
            None => {
                log::debug!("Layer {}: {}", layer, target);
                self.engine.set_clip(layer, target, true);
            }
        }

        self.tracks.insert(layer, PlaybackTrack { target });
    }

    /// Interrupt `layer` with `clip` once, then go back to the layer's
    /// target (through a transition if one is registered). The target
    /// itself is left as it was.
    pub fn play_one_shot(&mut self, clip: ClipHandle, layer: usize) {
        self.engine.set_clip(layer, clip, false);

        let Some(target) = self.target_clip(layer) else {
            log::debug!("Layer {}: one-shot {} with nothing to resume", layer, clip);
            return;
        };

        if let Some(transition) = self.catalog.resolve_transition(clip, target) {
            self.engine.queue_clip(layer, transition, false, 0.0);
        }
        self.engine.queue_clip(layer, target, true, 0.0);
        log::debug!("Layer {}: one-shot {} then {}", layer, clip, target);
    }

    /// Face the direction of a nonzero horizontal input
    pub fn set_flip(&mut self, horizontal: f32) {
        if horizontal != 0.0 {
            self.flip_horizontal = horizontal < 0.0;
        }
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Track for `layer`, once something has been played on it
    pub fn track(&self, layer: usize) -> Option<&PlaybackTrack> {
        self.tracks.get(&layer)
    }

    /// Steady-state clip of `layer`
    pub fn target_clip(&self, layer: usize) -> Option<ClipHandle> {
        self.track(layer).map(|track| track.target)
    }

    pub fn catalog(&self) -> &AnimationCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
