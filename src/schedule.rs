//! Tick scheduling for the recorder loop.
//!
//! A scheduler holds at most one pending tick. Requesting a new tick replaces the pending one,
//! which keeps a recorder from ever running two loop drivers at once.

use std::time::{Duration, Instant};

/// Identifies one requested tick so it can be cancelled or matched when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Single-slot tick source driving the recorder loop.
pub trait Scheduler {
    /// Request the next tick, replacing any pending request.
    fn request(&mut self) -> TickHandle;

    /// Cancel `handle` if it is still pending. Stale handles are ignored.
    fn cancel(&mut self, handle: TickHandle);

    /// Wait until the pending tick is due and take it.
    ///
    /// Returns `None` when nothing is pending.
    fn poll(&mut self) -> Option<TickHandle>;

    /// `true` while a tick is pending.
    fn is_pending(&self) -> bool;
}

#[derive(Debug, Default)]
struct Slot {
    next_id: u64,
    pending: Option<TickHandle>,
}

impl Slot {
    fn request(&mut self) -> TickHandle {
        let h = TickHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(h);
        h
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Fires pending ticks immediately when polled.
///
/// Used for headless capture where frame pacing comes from the fixed-rate timestamps, and for
/// interleaving several recorders by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    slot: Slot,
}

impl ManualScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn request(&mut self) -> TickHandle {
        self.slot.request()
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.slot.cancel(handle);
    }

    fn poll(&mut self) -> Option<TickHandle> {
        self.slot.pending.take()
    }

    fn is_pending(&self) -> bool {
        self.slot.pending.is_some()
    }
}

/// Fires ticks on a fixed display cadence, sleeping until each one is due.
///
/// Late ticks fire immediately and the cadence restarts from the late tick instead of bursting
/// to catch up.
#[derive(Debug)]
pub struct PacedScheduler {
    slot: Slot,
    interval: Duration,
    next_due: Option<Instant>,
}

impl PacedScheduler {
    /// Cadence of a typical 60 Hz display.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(16_667);

    /// Create a scheduler firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            slot: Slot::default(),
            interval,
            next_due: None,
        }
    }

    /// Create a scheduler firing `hz` times per second.
    pub fn with_rate(hz: f64) -> Self {
        if hz.is_finite() && hz > 0.0 {
            Self::new(Duration::from_secs_f64(1.0 / hz))
        } else {
            Self::default()
        }
    }

    /// Interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PacedScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl Scheduler for PacedScheduler {
    fn request(&mut self) -> TickHandle {
        self.slot.request()
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.slot.cancel(handle);
    }

    fn poll(&mut self) -> Option<TickHandle> {
        let handle = self.slot.pending.take()?;
        let now = Instant::now();
        let due = self.next_due.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        let fired = due.max(now);
        self.next_due = Some(fired + self.interval);
        Some(handle)
    }

    fn is_pending(&self) -> bool {
        self.slot.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule.rs"]
mod tests;
