use crate::constants::{BASE_SIZE, BEAT_AMPLITUDE, PULSE_RATE, SIZE_AMPLITUDE};

/// Heartbeat phase accumulator.
///
/// Both derived values are periodic in `phase`, so nothing but the elapsed
/// time needs to be carried between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pulse {
    pub phase: f32,
}

impl Pulse {
    pub fn advance(&mut self, dt_sec: f32) {
        self.phase += dt_sec;
    }

    /// Vertical squash applied to the outline scan, around 1.0.
    pub fn beat_factor(&self) -> f32 {
        1.0 + BEAT_AMPLITUDE * (self.phase * PULSE_RATE).sin()
    }

    pub fn heart_size(&self) -> f32 {
        BASE_SIZE * (1.0 + SIZE_AMPLITUDE * (self.phase * PULSE_RATE).sin())
    }
}
