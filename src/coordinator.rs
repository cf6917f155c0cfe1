//! Surface coordinator: owns the drawing surface and both controllers.
//!
//! ```text
//!                 on_surface_created                 finish(connected)
//!  ┌───────────┐ ──────────────────► ┌─────────────────┐ ─────────────► ┌────────────────┐
//!  │ NoSurface │                     │ CountdownActive │                │ ReadoutActive  │
//!  └───────────┘ ◄────────────────── └─────────────────┘                └────────────────┘
//!        ▲          on_surface_destroyed                                        │
//!        └──────────────────────────────────────────────────────────────────────┘
//!                               on_surface_destroyed
//! ```
//!
//! A surface created after the connection completed goes straight to
//! `ReadoutActive`. The coordinator is the only caller of the controllers'
//! ticks: [`SurfaceCoordinator::poll`] drives both schedulers, dispatches the
//! events they return and then draws the active card at most once.
//!
//! Draw failures (surface released by the host, canvas still locked) skip the
//! frame. The next requested redraw tries again.

use crate::{
    capabilities::{ConnectionBridge, Cue, CueId, CuePlayer, RenderTarget},
    config::DisplayConfig,
    countdown::{CountdownController, CountdownEvent},
    error::ConfigError,
    event_log::{EventLog, LogLevel},
    readout::{Channel, ReadoutController, ReadoutEvent},
    surface::{CanvasLock, DrawingSurface},
    widgets::{CountdownCard, ReadoutCard},
};

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Which card currently owns the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    #[default]
    NoSurface,
    CountdownActive,
    ReadoutActive,
}

/// Owner of the drawing surface, the two controllers and their render targets.
pub struct SurfaceCoordinator<S, P, B, CV = CountdownCard, RV = ReadoutCard>
where
    S: DrawingSurface,
    P: CuePlayer,
    B: ConnectionBridge,
    CV: RenderTarget<Model = CountdownController>,
    RV: RenderTarget<Model = ReadoutController>,
{
    surface: Option<S>,
    phase: Phase,
    connection_completed: bool,

    countdown: CountdownController,
    readout: ReadoutController,
    countdown_view: CV,
    readout_view: RV,

    cue_player: P,
    bridge: B,
    tick_cue: CueId,
    connected_cue: CueId,

    redraw_requested: bool,
    skipping: bool,
    frames_drawn: u32,
    frames_skipped: u32,
    last_now: u64,
    log: EventLog,
}

impl<S, P, B> SurfaceCoordinator<S, P, B>
where
    S: DrawingSurface,
    P: CuePlayer,
    B: ConnectionBridge,
{
    /// Coordinator drawing the built-in countdown and readout cards.
    pub fn with_cards(
        config: DisplayConfig,
        cue_player: P,
        bridge: B,
    ) -> Result<Self, ConfigError> {
        Self::new(config, cue_player, bridge, CountdownCard::default(), ReadoutCard::new())
    }
}

impl<S, P, B, CV, RV> SurfaceCoordinator<S, P, B, CV, RV>
where
    S: DrawingSurface,
    P: CuePlayer,
    B: ConnectionBridge,
    CV: RenderTarget<Model = CountdownController>,
    RV: RenderTarget<Model = ReadoutController>,
{
    /// Validate the configuration, load both cues and prepare the controllers.
    ///
    /// The readout is force-started so it keeps ticking while hidden.
    pub fn new(
        config: DisplayConfig,
        mut cue_player: P,
        bridge: B,
        countdown_view: CV,
        readout_view: RV,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let tick_cue = cue_player.load_cue(Cue::Tick);
        let connected_cue = cue_player.load_cue(Cue::Connected);

        let mut readout = ReadoutController::new(&config);
        readout.set_force_start(true, 0);

        info!("coordinator ready, countdown {=u64} s", config.countdown_secs);

        Ok(Self {
            surface: None,
            phase: Phase::NoSurface,
            connection_completed: false,
            countdown: CountdownController::new(&config),
            readout,
            countdown_view,
            readout_view,
            cue_player,
            bridge,
            tick_cue,
            connected_cue,
            redraw_requested: false,
            skipping: false,
            frames_drawn: 0,
            frames_skipped: 0,
            last_now: 0,
            log: EventLog::new(),
        })
    }

    // =========================================================================
    // Surface Lifecycle
    // =========================================================================

    /// The host created a surface. Starts whichever card is due.
    pub fn on_surface_created(
        &mut self,
        surface: S,
        now: u64,
    ) {
        self.last_now = now;
        if self.surface.replace(surface).is_some() {
            warn!("surface replaced without destroy");
            self.log.note(LogLevel::Warn, now, "surface replaced");
        }

        if self.connection_completed {
            self.phase = Phase::ReadoutActive;
            self.readout.start(now);
            self.log.note(LogLevel::Info, now, "surface created: readout");
        } else {
            self.phase = Phase::CountdownActive;
            self.countdown.start(now);
            self.log.note(LogLevel::Info, now, "surface created: countdown");
        }
        info!("surface created");
        self.redraw_requested = true;
    }

    /// The surface was resized. Lays out both cards, active or not.
    pub fn on_surface_changed(
        &mut self,
        width: u32,
        height: u32,
    ) {
        let countdown_size = self.countdown_view.measure(width, height);
        self.countdown_view.layout(Rectangle::new(Point::zero(), countdown_size));

        let readout_size = self.readout_view.measure(width, height);
        self.readout_view.layout(Rectangle::new(Point::zero(), readout_size));

        debug!("surface changed to {=u32}x{=u32}", width, height);
        self.log
            .push(LogLevel::Debug, self.last_now, format_args!("surface {width}x{height}"));
        self.redraw_requested |= self.phase != Phase::NoSurface;
    }

    /// The host is destroying the surface. Stops the active card and hands
    /// the surface back.
    pub fn on_surface_destroyed(
        &mut self,
        now: u64,
    ) -> Option<S> {
        self.last_now = now;
        match self.phase {
            Phase::CountdownActive => self.countdown.stop(now),
            Phase::ReadoutActive => self.readout.stop(),
            Phase::NoSurface => {}
        }
        self.phase = Phase::NoSurface;
        self.redraw_requested = false;
        self.skipping = false;

        info!("surface destroyed");
        self.log.note(LogLevel::Info, now, "surface destroyed");
        self.surface.take()
    }

    // =========================================================================
    // Connection
    // =========================================================================

    /// Countdown finished, either elapsed or connected.
    pub fn on_countdown_finished(
        &mut self,
        connected: bool,
        now: u64,
    ) {
        self.last_now = now;
        if self.connection_completed {
            debug!("finish after connection ignored");
            self.log.note(LogLevel::Warn, now, "late finish ignored");
            return;
        }

        if !connected {
            info!("countdown elapsed without connection");
            self.log.note(LogLevel::Info, now, "no connection");
            self.redraw_requested = self.surface.is_some();
            return;
        }

        self.connection_completed = true;
        self.countdown.stop(now);
        self.readout.reset(now, now);
        self.cue_player.play(self.connected_cue);
        info!("sensor connected");
        self.log.note(LogLevel::Info, now, "connected");

        if self.surface.is_some() {
            self.phase = Phase::ReadoutActive;
            self.readout.start(now);
            self.redraw_requested = true;
        }
    }

    /// Push notification from the sensor link.
    ///
    /// Finishes a running countdown immediately. Ignored while no countdown
    /// is running.
    pub fn on_connection_established(
        &mut self,
        now: u64,
    ) {
        self.last_now = now;
        match self.countdown.finish_connected(now) {
            Some(event) => self.dispatch_countdown(event, now),
            None => {
                debug!("connection signal while countdown idle");
                self.log.note(LogLevel::Warn, now, "connection ignored");
            }
        }
    }

    fn dispatch_countdown(
        &mut self,
        event: CountdownEvent,
        now: u64,
    ) {
        match event {
            CountdownEvent::Tick { play_cue, .. } => {
                if play_cue {
                    self.cue_player.play(self.tick_cue);
                }
                self.redraw_requested = true;
            }
            CountdownEvent::Finish { connected } => self.on_countdown_finished(connected, now),
        }
    }

    // =========================================================================
    // Readout Forwarding
    // =========================================================================

    /// Host visibility notification for the readout view.
    pub fn on_readout_visibility_changed(
        &mut self,
        visible: bool,
        now: u64,
    ) {
        self.last_now = now;
        self.readout.on_visibility_changed(visible, now);
    }

    /// The readout view was detached from its window.
    pub fn on_readout_detached(&mut self) { self.readout.on_detached(); }

    /// Store a new value for one channel. Shown on the next readout frame.
    pub fn set_channel(
        &mut self,
        channel: Channel,
        value: &str,
    ) {
        self.readout.set_channel(channel, value);
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Drive both schedulers and draw at most one frame.
    ///
    /// Returns `true` if a frame was presented.
    pub fn poll(
        &mut self,
        now: u64,
    ) -> bool {
        self.last_now = now;

        if let Some(event) = self.countdown.poll(now, &self.bridge) {
            self.dispatch_countdown(event, now);
        }

        if let Some(ReadoutEvent::Changed) = self.readout.poll(now)
            && self.phase == Phase::ReadoutActive
        {
            self.redraw_requested = true;
        }

        if !self.redraw_requested {
            return false;
        }
        self.redraw_requested = false;
        self.draw(now)
    }

    /// Draw the active card to the surface.
    ///
    /// Returns `false` if there is no surface or the canvas could not be
    /// locked; the frame is skipped in that case.
    pub fn draw(
        &mut self,
        now: u64,
    ) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        match CanvasLock::acquire(surface) {
            Ok(mut lock) => {
                match self.phase {
                    Phase::CountdownActive => self.countdown_view.draw(&self.countdown, lock.canvas()),
                    Phase::ReadoutActive => self.readout_view.draw(&self.readout, lock.canvas()),
                    Phase::NoSurface => {}
                }
                lock.present();
                self.frames_drawn = self.frames_drawn.wrapping_add(1);
                self.skipping = false;
                true
            }
            Err(e) => {
                self.frames_skipped = self.frames_skipped.wrapping_add(1);
                debug!("frame skipped: {}", e);
                if !self.skipping {
                    self.log.push(LogLevel::Debug, now, format_args!("draw skipped: {e}"));
                    self.skipping = true;
                }
                false
            }
        }
    }

    /// Stop both controllers, e.g. when the host app goes away.
    pub fn shutdown(
        &mut self,
        now: u64,
    ) {
        self.last_now = now;
        self.countdown.stop(now);
        self.readout.stop();
        self.redraw_requested = false;
        info!("coordinator shut down");
        self.log.note(LogLevel::Info, now, "shutdown");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn phase(&self) -> Phase { self.phase }

    /// Whether the sensor connection has completed.
    #[inline]
    pub const fn is_connected(&self) -> bool { self.connection_completed }

    #[inline]
    pub const fn surface(&self) -> Option<&S> { self.surface.as_ref() }

    #[inline]
    pub fn surface_mut(&mut self) -> Option<&mut S> { self.surface.as_mut() }

    #[inline]
    pub const fn countdown(&self) -> &CountdownController { &self.countdown }

    /// Countdown controller, for configuring the duration before a surface exists.
    #[inline]
    pub fn countdown_mut(&mut self) -> &mut CountdownController { &mut self.countdown }

    #[inline]
    pub const fn readout(&self) -> &ReadoutController { &self.readout }

    #[inline]
    pub const fn countdown_view(&self) -> &CV { &self.countdown_view }

    #[inline]
    pub const fn readout_view(&self) -> &RV { &self.readout_view }

    #[inline]
    pub const fn cue_player(&self) -> &P { &self.cue_player }

    #[inline]
    pub const fn bridge(&self) -> &B { &self.bridge }

    #[inline]
    pub const fn event_log(&self) -> &EventLog { &self.log }

    /// Frames presented since construction.
    #[inline]
    pub const fn frames_drawn(&self) -> u32 { self.frames_drawn }

    /// Frames dropped because the canvas could not be locked.
    #[inline]
    pub const fn frames_skipped(&self) -> u32 { self.frames_skipped }
}
