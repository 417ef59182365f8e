// Layered clip playback with queued follow-ups

use crate::engine::assets::{AnimationClip, ClipHandle, ClipLibrary};
use std::collections::{HashMap, VecDeque};

/// The playback side of animation: something that can start a clip now and
/// append a clip to play after whatever is currently on a layer.
pub trait PlaybackEngine {
    /// Replace everything on `layer` with `clip`, clearing its queue
    fn set_clip(&mut self, layer: usize, clip: ClipHandle, looping: bool);

    /// Append `clip` to `layer`, starting `delay` seconds after the entry
    /// before it finishes
    fn queue_clip(&mut self, layer: usize, clip: ClipHandle, looping: bool, delay: f32);
}

/// A clip scheduled on a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackEntry {
    pub clip: ClipHandle,
    pub looping: bool,
    pub delay: f32,
}

/// Data needed to render a layer's current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameData {
    pub clip: ClipHandle,
    pub frame_index: usize,
}

/// A clip marker passed during [`ClipSequencer::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClipEvent {
    pub layer: usize,
    pub clip: ClipHandle,
    pub name: String,
    /// Marker time within the clip
    pub time: f32,
}

type ClipEventHandler = Box<dyn FnMut(&ClipEvent)>;

#[derive(Debug, Clone, Copy)]
struct ActiveEntry {
    entry: PlaybackEntry,
    /// Seconds since the entry started
    elapsed: f32,
}

/// Collect the markers of `handle` between `from` and `to`
fn push_markers(
    fired: &mut Vec<ClipEvent>,
    layer: usize,
    handle: ClipHandle,
    clip: Option<&AnimationClip>,
    from: f32,
    to: f32,
    reached_end: bool,
) {
    let Some(clip) = clip else {
        return;
    };
    fired.extend(
        clip.markers_between(from, to, reached_end)
            .map(|marker| ClipEvent {
                layer,
                clip: handle,
                name: marker.name.clone(),
                time: marker.time,
            }),
    );
}

#[derive(Debug, Default)]
struct LayerPlayback {
    active: Option<ActiveEntry>,
    queue: VecDeque<PlaybackEntry>,
}

impl LayerPlayback {
    fn advance(&mut self, layer: usize, dt: f32, library: &ClipLibrary, fired: &mut Vec<ClipEvent>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        // Start of the span not yet scanned for markers
        let mut from = active.elapsed;
        active.elapsed += dt;

        loop {
            let Some(active) = self.active.as_mut() else {
                return;
            };
            let handle = active.entry.clip;
            let clip = library.get(handle);
            let duration = clip.map(|clip| clip.total_duration()).unwrap_or(0.0);

            let Some(next) = self.queue.front().copied() else {
                // Nothing queued: loop or hold the last frame
                if active.entry.looping && duration > 0.0 {
                    while active.elapsed >= duration {
                        push_markers(fired, layer, handle, clip, from, duration, true);
                        active.elapsed -= duration;
                        from = 0.0;
                    }
                    push_markers(fired, layer, handle, clip, from, active.elapsed, false);
                } else {
                    if from < duration {
                        let reached_end = active.elapsed >= duration;
                        let to = active.elapsed.min(duration);
                        push_markers(fired, layer, handle, clip, from, to, reached_end);
                    }
                    active.elapsed = active.elapsed.min(duration);
                }
                return;
            };

            let start_at = duration + next.delay.max(0.0);
            if active.elapsed < start_at {
                if from < duration {
                    let reached_end = active.elapsed >= duration;
                    let to = active.elapsed.min(duration);
                    push_markers(fired, layer, handle, clip, from, to, reached_end);
                }
                return;
            }

            if from < duration {
                push_markers(fired, layer, handle, clip, from, duration, true);
            }
            let leftover = active.elapsed - start_at;
            self.queue.pop_front();
            log::trace!("Queued {} starts with {:.3}s carried over", next.clip, leftover);
            self.active = Some(ActiveEntry {
                entry: next,
                elapsed: leftover,
            });
            from = 0.0;
        }
    }
}

/// Default [`PlaybackEngine`]: plays clips from a [`ClipLibrary`] on any
/// number of independent layers
#[derive(Default)]
pub struct ClipSequencer {
    layers: HashMap<usize, LayerPlayback>,
    listeners: Vec<ClipEventHandler>,
}

impl ClipSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every marker passed by later updates
    pub fn subscribe(&mut self, handler: impl FnMut(&ClipEvent) + 'static) {
        self.listeners.push(Box::new(handler));
    }

    /// Advance every layer by `dt` seconds, then report the markers passed
    /// on each layer in timeline order
    pub fn update(&mut self, dt: f32, library: &ClipLibrary) {
        let mut fired = Vec::new();
        for (&layer, playback) in self.layers.iter_mut() {
            playback.advance(layer, dt, library, &mut fired);
        }
        fired.sort_by_key(|event| event.layer);

        for event in &fired {
            log::trace!(
                "Layer {}: '{}' marker '{}'",
                event.layer,
                library.name(event.clip),
                event.name
            );
            for listener in self.listeners.iter_mut() {
                listener(event);
            }
        }
    }

    /// Clip currently playing on `layer`
    pub fn active_clip(&self, layer: usize) -> Option<ClipHandle> {
        self.active(layer).map(|active| active.entry.clip)
    }

    /// Whether the clip currently playing on `layer` loops
    pub fn is_looping(&self, layer: usize) -> bool {
        self.active(layer).is_some_and(|active| active.entry.looping)
    }

    /// Entries waiting on `layer`, in play order
    pub fn queued(&self, layer: usize) -> Vec<PlaybackEntry> {
        self.layers
            .get(&layer)
            .map(|playback| playback.queue.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Current frame of `layer`
    pub fn frame_data(&self, layer: usize, library: &ClipLibrary) -> Option<FrameData> {
        let active = self.active(layer)?;
        let frame_index = library
            .get(active.entry.clip)
            .map(|clip| clip.frame_at(active.elapsed))
            .unwrap_or(0);

        Some(FrameData {
            clip: active.entry.clip,
            frame_index,
        })
    }

    /// Check if `layer` holds the end of a non-looping clip with nothing queued
    pub fn is_finished(&self, layer: usize, library: &ClipLibrary) -> bool {
        let Some(playback) = self.layers.get(&layer) else {
            return true;
        };
        let Some(active) = playback.active else {
            return true;
        };
        let duration = library
            .get(active.entry.clip)
            .map(|clip| clip.total_duration())
            .unwrap_or(0.0);

        !active.entry.looping && playback.queue.is_empty() && active.elapsed >= duration
    }

    fn active(&self, layer: usize) -> Option<&ActiveEntry> {
        self.layers.get(&layer)?.active.as_ref()
    }
}

impl std::fmt::Debug for ClipSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipSequencer")
            .field("layers", &self.layers)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PlaybackEngine for ClipSequencer {
    fn set_clip(&mut self, layer: usize, clip: ClipHandle, looping: bool) {
        let playback = self.layers.entry(layer).or_default();
        playback.queue.clear();
        playback.active = Some(ActiveEntry {
            entry: PlaybackEntry {
                clip,
                looping,
                delay: 0.0,
            },
            elapsed: 0.0,
        });
    }

    fn queue_clip(&mut self, layer: usize, clip: ClipHandle, looping: bool, delay: f32) {
        let entry = PlaybackEntry {
            clip,
            looping,
            delay,
        };
        let playback = self.layers.entry(layer).or_default();

        if playback.active.is_none() {
            playback.active = Some(ActiveEntry {
                entry,
                elapsed: 0.0,
            });
        } else {
            playback.queue.push_back(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Clips {
        library: ClipLibrary,
        idle: ClipHandle,
        land: ClipHandle,
        run: ClipHandle,
    }

    fn clips() -> Clips {
        let mut library = ClipLibrary::new();
        // 4 frames at 10 FPS: 0.4s per cycle
        let idle = library.register(AnimationClip::new("idle", 4, 10.0)).unwrap();
        // 2 frames at 10 FPS: 0.2s
        let land = library.register(AnimationClip::new("land", 2, 10.0)).unwrap();
        let run = library.register(AnimationClip::new("run", 4, 10.0)).unwrap();
        Clips {
            library,
            idle,
            land,
            run,
        }
    }

    #[test]
    fn test_empty_layer() {
        let clips = clips();
        let sequencer = ClipSequencer::new();
        assert_eq!(sequencer.active_clip(0), None);
        assert!(sequencer.queued(0).is_empty());
        assert!(sequencer.frame_data(0, &clips.library).is_none());
        assert!(sequencer.is_finished(0, &clips.library));
    }

    #[test]
    fn test_looping_clip_wraps() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.idle, true);

        sequencer.update(0.15, &clips.library);
        assert_eq!(sequencer.frame_data(0, &clips.library).map(|f| f.frame_index), Some(1));

        sequencer.update(0.3, &clips.library); // 0.45s, wrapped to 0.05s
        assert_eq!(sequencer.frame_data(0, &clips.library).map(|f| f.frame_index), Some(0));
        assert!(sequencer.is_looping(0));
        assert!(!sequencer.is_finished(0, &clips.library));
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.land, false);

        sequencer.update(1.0, &clips.library);
        assert_eq!(
            sequencer.frame_data(0, &clips.library),
            Some(FrameData {
                clip: clips.land,
                frame_index: 1
            })
        );
        assert!(sequencer.is_finished(0, &clips.library));
    }

    #[test]
    fn test_queued_clip_starts_at_end_of_current() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.land, false);
        sequencer.queue_clip(0, clips.idle, true, 0.0);

        sequencer.update(0.15, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.land));

        // 0.25s total: land ended at 0.2s, idle has 0.05s
        sequencer.update(0.1, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.idle));
        assert!(sequencer.queued(0).is_empty());
        assert_eq!(sequencer.frame_data(0, &clips.library).map(|f| f.frame_index), Some(0));
    }

    #[test]
    fn test_queue_chain_in_one_update() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.land, false);
        sequencer.queue_clip(0, clips.land, false, 0.0);
        sequencer.queue_clip(0, clips.run, true, 0.0);

        // Both lands (0.4s) pass within one long update
        sequencer.update(0.55, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.run));
        assert_eq!(sequencer.frame_data(0, &clips.library).map(|f| f.frame_index), Some(1));
    }

    #[test]
    fn test_queue_delay() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.land, false);
        sequencer.queue_clip(0, clips.idle, true, 0.1);

        sequencer.update(0.25, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.land));

        sequencer.update(0.1, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.idle));
    }

    #[test]
    fn test_set_clip_clears_queue() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.land, false);
        sequencer.queue_clip(0, clips.idle, true, 0.0);
        sequencer.set_clip(0, clips.run, true);

        assert_eq!(sequencer.active_clip(0), Some(clips.run));
        assert!(sequencer.queued(0).is_empty());
    }

    #[test]
    fn test_queue_on_empty_layer_plays_immediately() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.queue_clip(2, clips.run, true, 0.5);

        assert_eq!(sequencer.active_clip(2), Some(clips.run));
        assert!(sequencer.queued(2).is_empty());
    }

    #[test]
    fn test_layers_are_independent() {
        let clips = clips();
        let mut sequencer = ClipSequencer::new();
        sequencer.set_clip(0, clips.idle, true);
        sequencer.set_clip(1, clips.land, false);

        sequencer.update(0.3, &clips.library);
        assert_eq!(sequencer.active_clip(0), Some(clips.idle));
        assert!(!sequencer.is_finished(0, &clips.library));
        assert!(sequencer.is_finished(1, &clips.library));
    }

    fn record_markers(sequencer: &mut ClipSequencer) -> Rc<RefCell<Vec<(usize, String, f32)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        sequencer.subscribe(move |event| {
            sink.borrow_mut()
                .push((event.layer, event.name.clone(), event.time))
        });
        log
    }

    fn marked_clips() -> (ClipLibrary, ClipHandle, ClipHandle) {
        let mut library = ClipLibrary::new();
        // 0.4s cycle, steps at 0.0 and 0.2
        let walk = library
            .register(
                AnimationClip::new("walk", 4, 10.0)
                    .with_marker(0.0, "left")
                    .with_marker(0.2, "right"),
            )
            .unwrap();
        // 0.2s, impact on the last instant
        let land = library
            .register(AnimationClip::new("land", 2, 10.0).with_marker(0.2, "impact"))
            .unwrap();
        (library, walk, land)
    }

    fn names(log: &Rc<RefCell<Vec<(usize, String, f32)>>>) -> Vec<String> {
        log.borrow().iter().map(|(_, name, _)| name.clone()).collect()
    }

    #[test]
    fn test_markers_fire_once_per_pass() {
        let (library, walk, _) = marked_clips();
        let mut sequencer = ClipSequencer::new();
        let log = record_markers(&mut sequencer);
        sequencer.set_clip(0, walk, true);

        sequencer.update(0.1, &library);
        assert_eq!(names(&log), vec!["left"]);

        sequencer.update(0.05, &library);
        assert_eq!(names(&log), vec!["left"]);

        sequencer.update(0.1, &library);
        assert_eq!(names(&log), vec!["left", "right"]);
    }

    #[test]
    fn test_long_update_fires_every_crossed_marker() {
        let (library, walk, land) = marked_clips();
        let mut sequencer = ClipSequencer::new();
        let log = record_markers(&mut sequencer);
        sequencer.set_clip(0, land, false);
        sequencer.queue_clip(0, walk, true, 0.0);

        // land (0.2s), one full walk cycle, then 0.25s into the next
        sequencer.update(0.85, &library);

        assert_eq!(
            names(&log),
            vec!["impact", "left", "right", "left", "right"]
        );
        assert_eq!(sequencer.active_clip(0), Some(walk));
    }

    #[test]
    fn test_held_clip_does_not_refire() {
        let (library, _, land) = marked_clips();
        let mut sequencer = ClipSequencer::new();
        let log = record_markers(&mut sequencer);
        sequencer.set_clip(0, land, false);

        sequencer.update(0.3, &library);
        sequencer.update(0.3, &library);

        assert_eq!(names(&log), vec!["impact"]);
        assert!(sequencer.is_finished(0, &library));
    }

    #[test]
    fn test_markers_during_queue_delay() {
        let (library, walk, land) = marked_clips();
        let mut sequencer = ClipSequencer::new();
        let log = record_markers(&mut sequencer);
        sequencer.set_clip(0, land, false);
        sequencer.queue_clip(0, walk, true, 0.1);

        // land ends, the delay is still running
        sequencer.update(0.25, &library);
        assert_eq!(names(&log), vec!["impact"]);
        assert_eq!(sequencer.active_clip(0), Some(land));

        // walk starts 0.05s in
        sequencer.update(0.1, &library);
        assert_eq!(names(&log), vec!["impact", "left"]);
        assert_eq!(sequencer.active_clip(0), Some(walk));
    }

    #[test]
    fn test_markers_report_their_layer() {
        let (library, walk, land) = marked_clips();
        let mut sequencer = ClipSequencer::new();
        let log = record_markers(&mut sequencer);
        sequencer.set_clip(3, land, false);
        sequencer.set_clip(1, walk, true);

        sequencer.update(0.3, &library);

        assert_eq!(
            *log.borrow(),
            vec![
                (1, "left".to_string(), 0.0),
                (1, "right".to_string(), 0.2),
                (3, "impact".to_string(), 0.2),
            ]
        );
    }
}
