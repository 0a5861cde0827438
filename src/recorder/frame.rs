use std::ops::{Deref, DerefMut};

use crate::foundation::core::FrameIndex;

/// Per-tick view handed to the draw callback.
///
/// Derefs to the surface, so drawing helpers can be called on the frame directly.
pub struct Frame<'a, S> {
    surface: &'a mut S,
    index: FrameIndex,
    time_ms: f64,
    stop: bool,
}

impl<'a, S> Frame<'a, S> {
    pub(crate) fn new(surface: &'a mut S, index: FrameIndex, time_ms: f64) -> Self {
        Self {
            surface,
            index,
            time_ms,
            stop: false,
        }
    }

    /// The surface being drawn.
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Presented timestamp in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Index of this tick within the session.
    pub fn index(&self) -> FrameIndex {
        self.index
    }

    /// Stop the session once this callback returns.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    /// `true` once [`Frame::stop`] was called.
    pub fn stop_requested(&self) -> bool {
        self.stop
    }
}

impl<S> Deref for Frame<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S> DerefMut for Frame<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}
