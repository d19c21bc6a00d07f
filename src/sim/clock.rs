//! Frame timing
//!
//! Turns wall-clock samples into the elapsed milliseconds fed to the
//! simulation. The step is capped at [`MAX_FRAME_MS`] so a slow frame (or a
//! backgrounded tab) never advances physics by more than a 60 Hz step.

use crate::consts::MAX_FRAME_MS;

/// Clamp a raw elapsed time to `[0, MAX_FRAME_MS]`.
///
/// Negative values come from clock adjustments and count as no time.
#[inline]
pub fn clamp_frame_ms(elapsed_ms: f64) -> f64 {
    elapsed_ms.clamp(0.0, MAX_FRAME_MS)
}

/// Tracks the previous clock sample
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known sample instead of treating the first frame as zero
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            last_ms: Some(now_ms),
        }
    }

    /// Record `now_ms` and return the clamped time since the previous sample.
    ///
    /// The first sample yields 0. The sample is always recorded, even when
    /// the caller then skips the simulation (paused), so unpausing does not
    /// produce one large step.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let elapsed = match self.last_ms {
            Some(last) => clamp_frame_ms(now_ms - last),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        elapsed
    }
}
