//! Frame timing for the draw loop.
//!
//! Scenes animate off two quantities: absolute elapsed time (for uniforms
//! driven by a sine or a spin angle) and per-frame delta time. `FrameClock`
//! produces both. Delta is clamped so that a debugger pause or a minimized
//! window does not feed a huge step into the animation; elapsed time is
//! left unclamped.

use std::time::{Duration, Instant};

/// Upper bound on the per-frame delta. Anything longer is treated as a
/// stall, not as simulation time.
const MAX_DELTA: Duration = Duration::from_millis(250);

/// Timing snapshot for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Seconds since the clock was created, unclamped.
    pub elapsed_secs: f32,
    /// Seconds since the previous tick, clamped to [`MAX_DELTA`].
    pub delta_secs: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces a [`FrameTime`] per call to [`FrameClock::tick`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose elapsed time starts now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
        }
    }

    /// Advances the clock and returns the snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last).min(MAX_DELTA);
        self.last = now;

        let frame = FrameTime {
            elapsed_secs: now.saturating_duration_since(self.start).as_secs_f32(),
            delta_secs: delta.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
