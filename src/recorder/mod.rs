//! Recorder state machine.
//!
//! A [`Recorder`] owns one surface for its whole life and, while active, one session with its own
//! archive. The loop is cooperative: [`Recorder::pump`] advances exactly one step (finalize a
//! stopped session, finish an in-flight capture, or run one tick) and [`Recorder::run`] pumps until
//! nothing is left to do.
//!
//! Ordering contract: while capturing, the next tick is only scheduled after the previous frame's
//! bytes were added to the archive, so entries land in strictly increasing frame order.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use crate::archive::{ArchiveBuilder, FinishedArchive};
use crate::delivery::{PresentTarget, default_handler};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::schedule::{ManualScheduler, Scheduler, TickHandle};
use crate::surface::framebuffer::FramebufferSurface;
use crate::surface::raster::RasterSurface;
use crate::surface::{PendingFrame, Surface};
use crate::timing::TimingPolicy;

/// Per-tick draw context.
pub mod frame;
/// Settings and the options builder.
pub mod options;

use frame::Frame;
use options::{CompletionHandler, Options, Settings};

type DrawFn<S> = Box<dyn FnMut(&mut Frame<'_, S>)>;
type SetupFn<S> = Box<dyn FnMut(&mut S)>;
type CleanupFn = Box<dyn FnMut()>;

/// Lifecycle phase of a [`Recorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No session is running; options may change.
    Idle,
    /// Options or defaults are being applied to the surface.
    Configuring,
    /// A session is running.
    Active,
}

struct PendingCapture {
    index: FrameIndex,
    frame: PendingFrame,
}

struct Session {
    id: u64,
    next_frame: FrameIndex,
    captured: u64,
    started: Instant,
    archive: ArchiveBuilder,
    pending_tick: Option<TickHandle>,
    in_flight: Option<PendingCapture>,
}

impl Session {
    fn new(id: u64) -> Self {
        Self {
            id,
            next_frame: FrameIndex(0),
            captured: 0,
            started: Instant::now(),
            archive: ArchiveBuilder::new(),
            pending_tick: None,
            in_flight: None,
        }
    }
}

/// A stopped session whose archive still has to be finalized.
struct Finishing {
    session_id: u64,
    archive: ArchiveBuilder,
    in_flight: Option<PendingCapture>,
    on_complete: CompletionHandler,
}

/// Frame-loop recorder over a [`Surface`], driven by a [`Scheduler`].
pub struct Recorder<S, C = ManualScheduler> {
    surface: S,
    scheduler: C,
    settings: Settings,
    on_complete: CompletionHandler,

    draw: Option<DrawFn<S>>,
    setup: Option<SetupFn<S>>,
    cleanup: Option<CleanupFn>,

    phase: Phase,
    session: Option<Session>,
    finishing: VecDeque<Finishing>,
    sessions_started: u64,
    last_drawn: u64,
    last_captured: u64,

    bundle: ArchiveBuilder,
}

impl Recorder<RasterSurface> {
    /// Recorder over a fresh default-sized raster surface.
    pub fn raster() -> ReelResult<Self> {
        Self::new(RasterSurface::new(Settings::default().size)?)
    }
}

impl Recorder<FramebufferSurface> {
    /// Recorder over a fresh default-sized frame buffer.
    pub fn framebuffer() -> ReelResult<Self> {
        Self::new(FramebufferSurface::new(Settings::default().size)?)
    }
}

impl<S: Surface> Recorder<S, ManualScheduler> {
    /// Recorder over `surface`, driven by hand through [`Recorder::pump`]/[`Recorder::run`].
    pub fn new(surface: S) -> ReelResult<Self> {
        Self::with_scheduler(surface, ManualScheduler::new())
    }
}

impl<S: Surface, C: Scheduler> Recorder<S, C> {
    /// Recorder over `surface` with a custom tick source.
    ///
    /// The surface is sized and cleared with the default settings right away.
    pub fn with_scheduler(surface: S, scheduler: C) -> ReelResult<Self> {
        let mut rec = Self {
            surface,
            scheduler,
            settings: Settings::default(),
            on_complete: default_handler(),
            draw: None,
            setup: None,
            cleanup: None,
            phase: Phase::Idle,
            session: None,
            finishing: VecDeque::new(),
            sessions_started: 0,
            last_drawn: 0,
            last_captured: 0,
            bundle: ArchiveBuilder::new(),
        };
        rec.apply_surface_settings()?;
        Ok(rec)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` while a session is running.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Borrow the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Borrow the surface mutably, e.g. to reach its drawing context.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    /// Ticks drawn in the current session, or in the last one once it stopped.
    pub fn frames_drawn(&self) -> u64 {
        self.session
            .as_ref()
            .map_or(self.last_drawn, |s| s.next_frame.0)
    }

    /// Frames written to the current session archive.
    ///
    /// After a stop this is the number of frames the stopped session hands to finalization,
    /// including a capture that was still being encoded.
    pub fn frames_captured(&self) -> u64 {
        self.session
            .as_ref()
            .map_or(self.last_captured, |s| s.captured)
    }

    /// `true` while a tick, a capture or a finalization is outstanding.
    pub fn has_pending_work(&self) -> bool {
        !self.finishing.is_empty()
            || self
                .session
                .as_ref()
                .is_some_and(|s| s.in_flight.is_some() || s.pending_tick.is_some())
    }

    /// Merge `opts` into the configuration and re-apply it to the surface.
    ///
    /// Fails while a session is active. Nothing changes when validation fails.
    pub fn options(&mut self, opts: impl Into<Options<S>>) -> ReelResult<()> {
        let opts = opts.into();
        if self.phase == Phase::Active {
            return Err(ReelError::invalid_state(
                "options cannot change while a session is active",
            ));
        }

        let next = self.settings.merged(&opts.patch);
        next.validate()?;
        opts.surface
            .as_ref()
            .unwrap_or(&self.surface)
            .check_size(next.size)?;

        self.phase = Phase::Configuring;
        self.settings = next;
        if let Some(handler) = opts.on_complete {
            self.on_complete = handler;
        }
        if let Some(surface) = opts.surface {
            tracing::debug!("surface replaced");
            self.surface = surface;
        }
        let applied = self.apply_surface_settings();
        self.phase = Phase::Idle;
        applied
    }

    /// Set the drawing callback, replacing any previous one.
    pub fn draw(&mut self, f: impl FnMut(&mut Frame<'_, S>) + 'static) {
        self.draw = Some(Box::new(f));
    }

    /// Set the hook run once after the surface is prepared and before the first tick.
    pub fn setup(&mut self, f: impl FnMut(&mut S) + 'static) {
        self.setup = Some(Box::new(f));
    }

    /// Set the hook run once when a session stops, before its archive is finalized.
    pub fn cleanup(&mut self, f: impl FnMut() + 'static) {
        self.cleanup = Some(Box::new(f));
    }

    /// Start a new session and schedule its first tick.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> ReelResult<()> {
        if self.phase == Phase::Active {
            return Err(ReelError::invalid_state(
                "start called while a session is already active",
            ));
        }
        if self.draw.is_none() {
            return Err(ReelError::missing_callback(
                "a drawing routine has to be registered with `draw` before `start`",
            ));
        }

        self.apply_surface_settings()?;

        self.sessions_started += 1;
        let mut session = Session::new(self.sessions_started);
        self.phase = Phase::Active;
        if let Some(setup) = self.setup.as_mut() {
            setup(&mut self.surface);
        }
        session.pending_tick = Some(self.scheduler.request());

        tracing::info!(
            session = session.id,
            record = self.settings.record,
            frames = self.settings.frames,
            fps = self.settings.fps,
            width = self.settings.size.width,
            height = self.settings.size.height,
            "session started"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Attach the surface to `target`, then [`Recorder::start`].
    pub fn bootstrap(&mut self, target: &mut impl PresentTarget<S>) -> ReelResult<()> {
        target.attach(&self.surface)?;
        self.start()
    }

    /// Stop the current session. Calling it again, or while idle, does nothing.
    ///
    /// If frames were captured, finalization is queued and runs on a later [`Recorder::pump`],
    /// after any in-flight capture was written. The completion handler then runs exactly once.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) {
        let Some(mut session) = self.session.take() else {
            self.phase = Phase::Idle;
            return;
        };
        if let Some(h) = session.pending_tick.take() {
            self.scheduler.cancel(h);
        }
        self.phase = Phase::Idle;

        if let Some(cleanup) = self.cleanup.as_mut() {
            cleanup();
        }

        let captured = session.captured + u64::from(session.in_flight.is_some());
        self.last_drawn = session.next_frame.0;
        self.last_captured = captured;
        if self.settings.record && captured > 0 {
            tracing::info!(
                session = session.id,
                frames = captured,
                "session stopped, finalizing archive"
            );
            self.finishing.push_back(Finishing {
                session_id: session.id,
                archive: session.archive,
                in_flight: session.in_flight,
                on_complete: Rc::clone(&self.on_complete),
            });
        } else {
            tracing::info!(
                session = session.id,
                drawn = session.next_frame.0,
                "session stopped without captured frames"
            );
        }
    }

    /// Abandon any active session, restore default settings and drop all callbacks.
    ///
    /// The completion handler is not invoked for the abandoned session. Archives already queued
    /// by an earlier [`Recorder::stop`] are finalized and delivered first.
    pub fn reset(&mut self) -> ReelResult<()> {
        if let Some(mut session) = self.session.take() {
            if let Some(h) = session.pending_tick.take() {
                self.scheduler.cancel(h);
            }
            if let Some(cleanup) = self.cleanup.as_mut() {
                cleanup();
            }
            tracing::info!(session = session.id, "session discarded by reset");
        }
        while let Some(fin) = self.finishing.pop_front() {
            let session = fin.session_id;
            if let Err(e) = self.finish(fin) {
                tracing::error!(session, error = %e, "failed to finalize archive during reset");
            }
        }

        self.phase = Phase::Configuring;
        self.settings = Settings::default();
        self.on_complete = default_handler();
        self.draw = None;
        self.setup = None;
        self.cleanup = None;
        self.bundle.reset();
        self.last_drawn = 0;
        self.last_captured = 0;
        let applied = self.apply_surface_settings();
        self.phase = Phase::Idle;
        applied
    }

    /// Advance the loop by one step. Returns whether more work is pending.
    pub fn pump(&mut self) -> ReelResult<bool> {
        if let Some(fin) = self.finishing.pop_front() {
            self.finish(fin)?;
        } else if self
            .session
            .as_ref()
            .is_some_and(|s| s.in_flight.is_some())
        {
            self.complete_capture()?;
        } else if let Some(handle) = self.scheduler.poll() {
            let current = self.session.as_ref().and_then(|s| s.pending_tick);
            if current == Some(handle) {
                self.tick()?;
            } else {
                tracing::debug!(?handle, "stale tick ignored");
            }
        }
        Ok(self.has_pending_work())
    }

    /// Pump until no tick, capture or finalization is left.
    ///
    /// With an unbounded frame limit this returns only once the draw callback stops the session.
    pub fn run(&mut self) -> ReelResult<()> {
        while self.pump()? {}
        Ok(())
    }

    /// Serialize the current surface into the manual bundle.
    ///
    /// Entries are named from the bundle length, starting at `000000.png`.
    pub fn add_frame(&mut self) -> ReelResult<FrameIndex> {
        if self.phase == Phase::Active {
            return Err(ReelError::invalid_state(
                "frames cannot be added by hand while a session is active",
            ));
        }
        let idx = FrameIndex(self.bundle.len() as u64);
        let png = self.surface.serialize_frame()?.resolve()?;
        self.bundle.put_frame(idx, &png)?;
        tracing::debug!(frame = idx.0, "frame added to bundle");
        Ok(idx)
    }

    /// Frames in the manual bundle.
    pub fn bundle_len(&self) -> usize {
        self.bundle.len()
    }

    /// Discard the manual bundle.
    pub fn reset_bundle(&mut self) {
        self.bundle.reset();
    }

    /// Finalize the manual bundle and return it; the bundle starts over empty.
    pub fn take_bundle(&mut self) -> ReelResult<FinishedArchive> {
        let archive = self.bundle.finalize()?;
        self.bundle.reset();
        Ok(archive)
    }

    /// Finalize the manual bundle and hand it to the completion handler.
    pub fn deliver_bundle(&mut self) -> ReelResult<()> {
        let archive = self.take_bundle()?;
        (self.on_complete)(archive);
        Ok(())
    }

    fn apply_surface_settings(&mut self) -> ReelResult<()> {
        let clear = self.settings.validate()?;
        self.surface.resize(self.settings.size)?;
        self.surface.set_clear_color(clear);
        self.surface.clear();
        Ok(())
    }

    fn tick(&mut self) -> ReelResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.pending_tick = None;

        let index = session.next_frame;
        let time_ms = TimingPolicy::for_capture(self.settings.record).timestamp_ms(
            index,
            self.settings.fps,
            session.started.elapsed(),
        );

        if self.settings.clear {
            self.surface.clear();
        }

        let Some(draw) = self.draw.as_mut() else {
            return Err(ReelError::missing_callback(
                "drawing routine was removed while a session was active",
            ));
        };
        let mut frame = Frame::new(&mut self.surface, index, time_ms);
        draw(&mut frame);
        let stop_requested = frame.stop_requested();
        session.next_frame = index.next();

        if self.settings.record {
            let pending = self.surface.serialize_frame()?;
            session.in_flight = Some(PendingCapture {
                index,
                frame: pending,
            });
            tracing::debug!(session = session.id, frame = index.0, time_ms, "frame captured");
            if stop_requested {
                self.stop();
            }
        } else if stop_requested
            || self
                .settings
                .frame_limit()
                .is_some_and(|n| session.next_frame.0 >= n)
        {
            self.stop();
        } else {
            session.pending_tick = Some(self.scheduler.request());
        }
        Ok(())
    }

    fn complete_capture(&mut self) -> ReelResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(capture) = session.in_flight.take() else {
            return Ok(());
        };

        let png = capture.frame.resolve()?;
        session.archive.put_frame(capture.index, &png)?;
        session.captured += 1;

        let limit_reached = self
            .settings
            .frame_limit()
            .is_some_and(|n| session.captured >= n);
        if limit_reached {
            self.stop();
        } else {
            session.pending_tick = Some(self.scheduler.request());
        }
        Ok(())
    }

    fn finish(&mut self, mut fin: Finishing) -> ReelResult<()> {
        if let Some(capture) = fin.in_flight.take() {
            let png = capture.frame.resolve()?;
            fin.archive.put_frame(capture.index, &png)?;
        }
        let archive = fin.archive.finalize()?;
        tracing::info!(
            session = fin.session_id,
            entries = archive.len(),
            bytes = archive.as_bytes().len(),
            "archive finalized"
        );
        (fin.on_complete)(archive);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recorder/recorder.rs"]
mod tests;
