//! framereel turns a procedural animation into a reproducible PNG image sequence.
//!
//! A [`Recorder`] runs a draw loop over a [`Surface`] and, while recording, serializes every frame
//! into an in-memory zip archive that is finalized exactly once per session and handed to a
//! completion callback.
//!
//! # Lifecycle
//!
//! 1. **Configure**: [`Recorder::options`] merges settings while idle (size, clear color, frame
//!    limit, fps, capture on/off, completion handler, optional surface swap).
//! 2. **Draw loop**: [`Recorder::draw`] registers the per-frame callback, [`Recorder::start`]
//!    opens a session and [`Recorder::run`] / [`Recorder::pump`] drive it.
//! 3. **Stop**: the frame limit, [`Frame::stop`] or [`Recorder::stop`] end the session; captured
//!    frames are finalized into a [`FinishedArchive`] (`000000.png`, `000001.png`, ...).
//!
//! # Timing
//!
//! While recording, the callback sees fixed-rate timestamps (`k * 1000 / fps`) no matter how long
//! a frame took to serialize. Without capture it sees real elapsed time. See [`TimingPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use framereel::{Options, Recorder, Rgba8};
//!
//! # fn main() -> framereel::ReelResult<()> {
//! let mut rec = Recorder::raster()?;
//! rec.options(Options::new().size(64, 64).frames(30).fps(30.0))?;
//! rec.draw(|frame| {
//!     let x = frame.time_ms() / 1000.0 * 64.0;
//!     frame.fill_rect(x, 16.0, 8.0, 8.0, Rgba8::rgb(255, 0, 0));
//! });
//! rec.start()?;
//! rec.run()?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod archive;
mod delivery;
mod foundation;
mod recorder;
mod schedule;
mod surface;
mod timing;

pub use archive::{
    ARCHIVE_MIME_TYPE, ArchiveBuilder, FRAME_EXTENSION, FinishedArchive, frame_entry_name,
};
pub use delivery::{
    DEFAULT_ARCHIVE_NAME, PresentTarget, default_handler, save_archive, save_to,
};
pub use foundation::color::parse_color;
pub use foundation::core::{FrameIndex, Rgba8, Size};
pub use foundation::error::{ReelError, ReelResult};
pub use recorder::frame::Frame;
pub use recorder::options::{CompletionHandler, Options, Settings, SettingsPatch};
pub use recorder::{Phase, Recorder};
pub use schedule::{ManualScheduler, PacedScheduler, Scheduler, TickHandle};
pub use surface::framebuffer::{FramebufferSurface, MAX_FRAMEBUFFER_BYTES};
pub use surface::raster::RasterSurface;
pub use surface::{FrameRGBA, PendingFrame, Surface};
pub use timing::TimingPolicy;

/// Re-export of the rasterizer behind [`RasterSurface`], for drawing through
/// [`RasterSurface::context`].
pub use vello_cpu;
