/// Game loop timing and control system
///
/// Implements a fixed timestep clock. Frame time is accumulated and split
/// into fixed updates, each of which is handed to the simulation as a
/// [`FrameTime`] with a monotonic `now`.
use std::time::Duration;

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
const MAX_UPDATE_STEPS: u32 = 5;

/// Time information for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Monotonic simulation time in seconds, at the start of the tick
    pub now: f32,
    /// Length of the tick in seconds
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }

    /// The tick following this one, with the same length
    pub fn next(&self) -> Self {
        Self {
            now: self.now + self.dt,
            dt: self.dt,
        }
    }
}

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Accumulate `frame_time` and return the fixed ticks it pays for
    pub fn advance(&mut self, frame_time: Duration) -> Vec<FrameTime> {
        self.frame_count += 1;
        self.accumulator += frame_time;

        let mut ticks = Vec::new();
        while self.accumulator >= FIXED_TIMESTEP_DURATION && (ticks.len() as u32) < MAX_UPDATE_STEPS
        {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks.push(FrameTime::new(self.now(), FIXED_TIMESTEP));
            self.update_count += 1;
        }

        if ticks.len() as u32 == MAX_UPDATE_STEPS && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!(
                "Frame took {:?}, dropping {:?} of simulation time",
                frame_time,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Simulation time at the start of the next tick (in seconds)
    pub fn now(&self) -> f32 {
        self.update_count as f32 * FIXED_TIMESTEP
    }

    /// Get the fixed timestep for updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get the interpolation alpha for smooth rendering between updates
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
