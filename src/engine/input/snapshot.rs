// Per-tick input snapshots

/// Everything the motion state machine reads from input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Horizontal axis (-1 to 1)
    pub horizontal: f32,
    /// Vertical axis (-1 to 1, negative is down)
    pub vertical: f32,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Jump went up this tick
    pub jump_released: bool,
    /// Attack is held this tick
    pub attack_held: bool,
}

impl InputSnapshot {
    /// Snapshot with only axis input
    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            ..Self::default()
        }
    }

    pub fn with_jump_pressed(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    pub fn with_jump_released(mut self) -> Self {
        self.jump_released = true;
        self
    }

    pub fn with_attack(mut self) -> Self {
        self.attack_held = true;
        self
    }
}

/// Raw held-state sample for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeldInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump: bool,
    pub attack: bool,
}

/// Turns held-button samples into snapshots with press/release edges
#[derive(Debug, Default)]
pub struct InputSampler {
    /// Whether jump was held in the previous sample
    previous_jump: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce this tick's snapshot from the held state
    pub fn sample(&mut self, held: HeldInput) -> InputSnapshot {
        let snapshot = InputSnapshot {
            horizontal: held.horizontal,
            vertical: held.vertical,
            jump_pressed: held.jump && !self.previous_jump,
            jump_released: !held.jump && self.previous_jump,
            attack_held: held.attack,
        };
        self.previous_jump = held.jump;
        snapshot
    }

    /// Forget the previous sample (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.previous_jump = false;
    }
}
