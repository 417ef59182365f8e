// Animation clip definitions

use serde::{Deserialize, Serialize};

/// A named point in a clip's timeline (footstep, swing, impact)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMarker {
    /// Seconds from the start of one cycle
    pub time: f32,
    pub name: String,
}

impl ClipMarker {
    pub fn new(time: f32, name: &str) -> Self {
        Self {
            time,
            name: name.to_string(),
        }
    }
}

/// A single animation clip as stored in the clip library
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "run", "idle-to-run")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Event markers, sorted by time
    pub markers: Vec<ClipMarker>,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: if fps > 0.0 { 1.0 / fps } else { 0.0 },
            markers: Vec::new(),
        }
    }

    /// Add an event marker at `time` seconds into the clip
    pub fn with_marker(mut self, time: f32, name: &str) -> Self {
        self.markers.push(ClipMarker::new(time, name));
        self.markers.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    pub fn with_markers(mut self, markers: impl IntoIterator<Item = ClipMarker>) -> Self {
        self.markers.extend(markers);
        self.markers.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Markers with `from <= time < to`, or `from <= time <= to` when the
    /// span runs to the end of the clip
    pub fn markers_between(
        &self,
        from: f32,
        to: f32,
        include_end: bool,
    ) -> impl Iterator<Item = &ClipMarker> {
        self.markers.iter().filter(move |marker| {
            marker.time >= from && (marker.time < to || (include_end && marker.time == to))
        })
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    /// Frame index shown after `elapsed` seconds of one cycle
    pub fn frame_at(&self, elapsed: f32) -> usize {
        if self.frame_duration <= 0.0 || self.frame_count == 0 {
            return 0;
        }
        let frame = (elapsed / self.frame_duration) as usize;
        frame.min(self.frame_count - 1)
    }
}

/// Serializable clip description, as found in configuration files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDefinition {
    pub name: String,
    pub frame_count: usize,
    pub fps: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<ClipMarker>,
}

impl ClipDefinition {
    pub fn new(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            fps,
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, time: f32, name: &str) -> Self {
        self.markers.push(ClipMarker::new(time, name));
        self
    }

    /// Build the library clip
    pub fn to_clip(&self) -> AnimationClip {
        AnimationClip::new(&self.name, self.frame_count, self.fps).with_markers(self.markers.clone())
    }
}
