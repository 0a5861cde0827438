//! Presented timestamps for the draw callback.

use std::time::Duration;

use crate::foundation::core::FrameIndex;

/// How the timestamp passed to the draw callback is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimingPolicy {
    /// `frame_index * 1000 / fps`, independent of how long a tick actually took.
    FixedRate,
    /// Real elapsed time since the session started.
    WallClock,
}

impl TimingPolicy {
    /// Capturing sessions run at a fixed rate; live preview follows the wall clock.
    pub fn for_capture(capture: bool) -> Self {
        if capture {
            Self::FixedRate
        } else {
            Self::WallClock
        }
    }

    /// Timestamp in milliseconds for the tick that starts at `frame`.
    pub fn timestamp_ms(self, frame: FrameIndex, fps: f64, elapsed: Duration) -> f64 {
        match self {
            Self::FixedRate => frame.0 as f64 * 1000.0 / fps,
            Self::WallClock => elapsed.as_secs_f64() * 1000.0,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/timing.rs"]
mod tests;
