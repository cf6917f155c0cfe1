//! Live sensor readout: chronometer plus ten channel values.
//!
//! The readout redraws every frame while its running flag is set:
//!
//! ```text
//! running = (visible || force_start) && started
//! ```
//!
//! The flag is re-derived on every lifecycle change. A rising edge schedules
//! an immediate tick, a falling edge cancels the pending one, and a change
//! that leaves the flag as it was does nothing.

pub mod channels;
pub mod chrono;

pub use channels::{CHANNEL_COUNT, Channel, ChannelValues, SENTINEL};
pub use chrono::ChronoReading;

use crate::config::DisplayConfig;
use crate::scheduler::FrameScheduler;

/// Event emitted by the readout controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadoutEvent {
    /// Visible state changed; the card should be redrawn.
    Changed,
}

/// Chronometer and channel state with its own frame loop.
#[derive(Debug)]
pub struct ReadoutController {
    base_timestamp: u64,
    channels: ChannelValues,
    chrono: ChronoReading,
    wrap_ms: u64,

    started: bool,
    visible: bool,
    force_start: bool,
    running: bool,

    scheduler: FrameScheduler,
}

impl ReadoutController {
    /// Create a stopped, hidden readout.
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            base_timestamp: 0,
            channels: ChannelValues::new(),
            chrono: ChronoReading::ZERO,
            wrap_ms: config.chrono_wrap_ms,
            started: false,
            visible: false,
            force_start: false,
            running: false,
            scheduler: FrameScheduler::new(config.frame_interval_ms),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restart the chronometer from `base_timestamp` and clear every channel.
    pub fn reset(
        &mut self,
        base_timestamp: u64,
        now: u64,
    ) -> ReadoutEvent {
        self.base_timestamp = base_timestamp;
        self.channels.reset();
        self.recompute(now);
        ReadoutEvent::Changed
    }

    /// Allow the frame loop to run.
    pub fn start(
        &mut self,
        now: u64,
    ) {
        self.started = true;
        self.update_running(now);
    }

    /// Halt the frame loop.
    pub fn stop(&mut self) {
        self.started = false;
        self.update_running_falling();
    }

    /// Keep running even while not visible.
    pub fn set_force_start(
        &mut self,
        force_start: bool,
        now: u64,
    ) {
        self.force_start = force_start;
        self.update_running(now);
    }

    /// Host visibility notification.
    pub fn on_visibility_changed(
        &mut self,
        visible: bool,
        now: u64,
    ) {
        self.visible = visible;
        self.update_running(now);
    }

    /// The view was detached from its window.
    pub fn on_detached(&mut self) {
        self.visible = false;
        self.update_running_falling();
    }

    const fn wants_running(&self) -> bool { (self.visible || self.force_start) && self.started }

    fn update_running(
        &mut self,
        now: u64,
    ) {
        let running = self.wants_running();
        if running == self.running {
            return;
        }
        self.running = running;
        if running {
            self.scheduler.arm_immediate(now);
            trace!("readout running");
        } else {
            self.scheduler.disarm();
            trace!("readout halted");
        }
    }

    /// Re-derive the flag where only a falling edge is possible.
    fn update_running_falling(&mut self) {
        if self.running && !self.wants_running() {
            self.running = false;
            self.scheduler.disarm();
            trace!("readout halted");
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Store a channel value. Drawn on the next frame.
    ///
    /// Returns `true` if the value was truncated to fit.
    pub fn set_channel(
        &mut self,
        channel: Channel,
        value: &str,
    ) -> bool {
        let truncated = self.channels.set(channel, value);
        if truncated {
            debug!("channel {=usize} value truncated", channel.index());
        }
        truncated
    }

    fn recompute(
        &mut self,
        now: u64,
    ) {
        self.chrono = ChronoReading::between(self.base_timestamp, now, self.wrap_ms);
    }

    // =========================================================================
    // Frame Loop
    // =========================================================================

    /// Run the tick if the scheduler is due.
    pub fn poll(
        &mut self,
        now: u64,
    ) -> Option<ReadoutEvent> {
        if self.scheduler.poll(now) {
            self.tick(now)
        } else {
            None
        }
    }

    /// Scheduler callback: refresh the chronometer and re-arm.
    ///
    /// Returns `None` (and leaves nothing armed) when not running.
    pub fn tick(
        &mut self,
        now: u64,
    ) -> Option<ReadoutEvent> {
        if !self.running {
            return None;
        }
        self.recompute(now);
        self.scheduler.arm(now);
        Some(ReadoutEvent::Changed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Chronometer origin set by the last `reset`.
    #[inline]
    pub const fn base_timestamp(&self) -> u64 { self.base_timestamp }

    /// Chronometer value computed by the last tick or reset.
    #[inline]
    pub const fn chrono(&self) -> ChronoReading { self.chrono }

    /// Current string of one channel.
    #[inline]
    pub fn channel(
        &self,
        channel: Channel,
    ) -> &str {
        self.channels.get(channel)
    }

    /// All channel values.
    #[inline]
    pub const fn channels(&self) -> &ChannelValues { &self.channels }

    #[inline]
    pub const fn is_running(&self) -> bool { self.running }

    #[inline]
    pub const fn is_started(&self) -> bool { self.started }

    #[inline]
    pub const fn is_visible(&self) -> bool { self.visible }

    #[inline]
    pub const fn force_start(&self) -> bool { self.force_start }

    /// The readout's frame scheduler.
    #[inline]
    pub const fn scheduler(&self) -> &FrameScheduler { &self.scheduler }
}
