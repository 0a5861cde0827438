use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::archive::FinishedArchive;
use crate::foundation::color::parse_color;
use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{ReelError, ReelResult};

/// Callback receiving a finalized archive.
pub type CompletionHandler = Rc<dyn Fn(FinishedArchive)>;

/// Recorder configuration.
///
/// Immutable while a session is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Serialize every frame into the session archive.
    pub record: bool,
    /// Clear the surface before each draw.
    pub clear: bool,
    /// Surface size in pixels.
    pub size: Size,
    /// Stop after this many frames; `<= 0` runs until stopped.
    pub frames: i64,
    /// Clear color (CSS color syntax).
    pub color: String,
    /// Frame rate used for fixed-rate timestamps while recording.
    pub fps: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            record: true,
            clear: false,
            size: Size::new(1024, 1024),
            frames: -1,
            color: "white".to_owned(),
            fps: 60.0,
        }
    }
}

impl Settings {
    /// Frame limit, if bounded.
    pub fn frame_limit(&self) -> Option<u64> {
        u64::try_from(self.frames).ok().filter(|&n| n > 0)
    }

    /// Apply `patch` on top of these settings. Unspecified fields keep their value.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            record: patch.record.unwrap_or(self.record),
            clear: patch.clear.unwrap_or(self.clear),
            size: patch.size.unwrap_or(self.size),
            frames: patch.frames.unwrap_or(self.frames),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
            fps: patch.fps.unwrap_or(self.fps),
        }
    }

    /// Validate values and return the parsed clear color.
    pub fn validate(&self) -> ReelResult<Rgba8> {
        self.size.validate()?;
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ReelError::validation(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        parse_color(&self.color)
    }
}

/// Partial [`Settings`]; `None` fields are left untouched when merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsPatch {
    /// See [`Settings::record`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    /// See [`Settings::clear`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear: Option<bool>,
    /// See [`Settings::size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// See [`Settings::frames`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<i64>,
    /// See [`Settings::color`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// See [`Settings::fps`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

impl SettingsPatch {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn overlay(mut self, other: SettingsPatch) -> Self {
        self.record = other.record.or(self.record);
        self.clear = other.clear.or(self.clear);
        self.size = other.size.or(self.size);
        self.frames = other.frames.or(self.frames);
        self.color = other.color.or(self.color);
        self.fps = other.fps.or(self.fps);
        self
    }
}

/// Options accepted by [`crate::Recorder::options`].
///
/// Besides the plain settings this carries the completion handler and an optional replacement
/// surface.
pub struct Options<S> {
    pub(crate) patch: SettingsPatch,
    pub(crate) on_complete: Option<CompletionHandler>,
    pub(crate) surface: Option<S>,
}

impl<S> Default for Options<S> {
    fn default() -> Self {
        Self {
            patch: SettingsPatch::default(),
            on_complete: None,
            surface: None,
        }
    }
}

impl<S> From<SettingsPatch> for Options<S> {
    fn from(patch: SettingsPatch) -> Self {
        Self {
            patch,
            ..Self::default()
        }
    }
}

impl<S> Options<S> {
    /// Empty options; applying them only re-applies the current settings to the surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frame capture.
    pub fn record(mut self, record: bool) -> Self {
        self.patch.record = Some(record);
        self
    }

    /// Enable or disable clearing before each draw.
    pub fn clear(mut self, clear: bool) -> Self {
        self.patch.clear = Some(clear);
        self
    }

    /// Set the surface size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.patch.size = Some(Size::new(width, height));
        self
    }

    /// Set the frame limit; `<= 0` is unbounded.
    pub fn frames(mut self, frames: i64) -> Self {
        self.patch.frames = Some(frames);
        self
    }

    /// Set the clear color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.patch.color = Some(color.into());
        self
    }

    /// Set the fixed-rate frame rate.
    pub fn fps(mut self, fps: f64) -> Self {
        self.patch.fps = Some(fps);
        self
    }

    /// Set the completion handler.
    pub fn on_complete(mut self, f: impl Fn(FinishedArchive) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    /// Replace the recorder's surface.
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recorder/options.rs"]
mod tests;
