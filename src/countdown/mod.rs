//! Connection countdown state machine.
//!
//! While the wearable searches for the sensor, the countdown card shows an
//! animated `searching...` status. Each tick:
//!
//! 1. computes `remaining = deadline - now`,
//! 2. finishes with `connected = false` once `remaining <= 0`,
//! 3. in the last 100 ms polls the connection bridge once and finishes with
//!    `connected = true` if the sensor is up ("last-tick preemption"),
//! 4. otherwise updates the [`AnimationFrame`], evaluates the per-second cue
//!    guard, and re-arms the scheduler.
//!
//! Events are returned to the caller (the coordinator) from the tick that
//! produced them, so there is exactly one observer and no queued dispatch.
//!
//! # Last-tick preemption
//!
//! The bridge is only polled on a tick that lands inside the final window.
//! With a 41 ms cadence at least two ticks fall inside it, but scheduler
//! drift can still make a connection that arrives right at expiry lose the
//! race. Hosts that can push connection events should call
//! [`CountdownController::finish_connected`] instead of relying on the poll.

pub mod animation;
pub mod cue;

pub use animation::{AnimationFrame, Easing};
pub use cue::CueState;

use crate::capabilities::ConnectionBridge;
use crate::config::{DisplayConfig, LAST_TICK_WINDOW_MS, SECOND_MS};
use crate::error::CountdownError;
use crate::scheduler::FrameScheduler;

/// Text shown by the countdown card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownStatus {
    /// Not started yet.
    #[default]
    Idle,
    /// Counting down, waiting for the sensor.
    Searching,
    /// Countdown elapsed without a connection.
    NoConnection,
    /// Sensor connected before the countdown elapsed.
    Connected,
}

impl CountdownStatus {
    /// Status line text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Searching => "searching...",
            Self::NoConnection => "no connection",
            Self::Connected => "connected",
        }
    }
}

/// Event emitted by a countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownEvent {
    /// Still counting. `play_cue` is set on the tick that owns this second's cue.
    Tick { remaining_ms: u64, play_cue: bool },
    /// Countdown over; no further ticks are scheduled.
    Finish { connected: bool },
}

/// Countdown controller: deadline, easing, cue guard and scheduler.
#[derive(Debug)]
pub struct CountdownController {
    total_duration_ms: u64,
    deadline: u64,
    started: bool,
    scheduler: FrameScheduler,
    cue: CueState,
    easing: Easing,
    animation: AnimationFrame,
    status: CountdownStatus,
}

impl CountdownController {
    /// Create a stopped countdown from the configuration.
    pub const fn new(config: &DisplayConfig) -> Self {
        Self {
            total_duration_ms: config.countdown_secs.saturating_mul(SECOND_MS),
            deadline: 0,
            started: false,
            scheduler: FrameScheduler::new(config.frame_interval_ms),
            cue: CueState::new(),
            easing: Easing::from_config(config),
            animation: AnimationFrame::SETTLED,
            status: CountdownStatus::Idle,
        }
    }

    /// Set the countdown length. Only valid before `start`.
    pub fn configure(
        &mut self,
        duration_secs: u64,
    ) -> Result<(), CountdownError> {
        if self.started {
            return Err(CountdownError::AlreadyStarted);
        }
        self.total_duration_ms = duration_secs.saturating_mul(SECOND_MS);
        Ok(())
    }

    /// Configured countdown length in whole seconds.
    #[inline]
    pub const fn duration_secs(&self) -> u64 { self.total_duration_ms / SECOND_MS }

    /// Start counting down from `now`. No-op while already started.
    pub fn start(
        &mut self,
        now: u64,
    ) {
        if self.started {
            return;
        }
        self.deadline = now.saturating_add(self.total_duration_ms);
        self.started = true;
        self.cue.reset();
        self.status = CountdownStatus::Searching;
        // First frame shows the start of a second, not the settled end of one
        self.animation = AnimationFrame::from_remaining(self.total_duration_ms.saturating_sub(1), &self.easing);
        self.scheduler.arm(now);
        debug!("countdown started, deadline {=u64}", self.deadline);
    }

    /// Stop counting. A stray tick after this observes `remaining <= 0`.
    pub fn stop(
        &mut self,
        now: u64,
    ) {
        self.started = false;
        self.deadline = now;
        self.scheduler.disarm();
    }

    /// Finish early because the connection was pushed by the host.
    ///
    /// Returns `None` if the countdown is not running.
    pub fn finish_connected(
        &mut self,
        now: u64,
    ) -> Option<CountdownEvent> {
        if !self.started {
            return None;
        }
        Some(self.finish(now, true))
    }

    /// Run the tick if the scheduler is due.
    pub fn poll<B>(
        &mut self,
        now: u64,
        bridge: &B,
    ) -> Option<CountdownEvent>
    where
        B: ConnectionBridge + ?Sized,
    {
        if self.scheduler.poll(now) {
            Some(self.tick(now, bridge))
        } else {
            None
        }
    }

    /// Scheduler callback: recompute and decide what happens next.
    pub fn tick<B>(
        &mut self,
        now: u64,
        bridge: &B,
    ) -> CountdownEvent
    where
        B: ConnectionBridge + ?Sized,
    {
        let remaining_ms = match self.deadline.checked_sub(now) {
            Some(remaining) if remaining > 0 => remaining,
            _ => return self.finish(now, false),
        };

        if remaining_ms < LAST_TICK_WINDOW_MS && bridge.is_connected() {
            debug!("last tick observed connection, {=u64} ms early", remaining_ms);
            return self.finish(now, true);
        }

        self.animation = AnimationFrame::from_remaining(remaining_ms, &self.easing);
        let play_cue = self.cue.evaluate(remaining_ms, self.easing.transition_ms);
        self.scheduler.arm(now);

        CountdownEvent::Tick { remaining_ms, play_cue }
    }

    fn finish(
        &mut self,
        now: u64,
        connected: bool,
    ) -> CountdownEvent {
        self.stop(now);
        self.animation = AnimationFrame::SETTLED;
        self.status = if connected {
            CountdownStatus::Connected
        } else {
            CountdownStatus::NoConnection
        };
        CountdownEvent::Finish { connected }
    }

    /// Milliseconds left before the deadline (zero once stopped).
    pub fn remaining_ms(
        &self,
        now: u64,
    ) -> u64 {
        if self.started {
            self.deadline.saturating_sub(now)
        } else {
            0
        }
    }

    /// Animation state computed by the last tick.
    #[inline]
    pub const fn animation(&self) -> AnimationFrame { self.animation }

    /// Current status line.
    #[inline]
    pub const fn status(&self) -> CountdownStatus { self.status }

    /// Whether the countdown is running.
    #[inline]
    pub const fn is_started(&self) -> bool { self.started }

    /// Deadline set by the last `start` (or `now` of the last `stop`).
    #[inline]
    pub const fn deadline(&self) -> u64 { self.deadline }

    /// The countdown's frame scheduler.
    #[inline]
    pub const fn scheduler(&self) -> &FrameScheduler { &self.scheduler }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FRAME_INTERVAL_MS;

    fn controller(secs: u64) -> CountdownController {
        CountdownController::new(&DisplayConfig::new().with_countdown_secs(secs))
    }

    /// Poll every millisecond from `from` to `to` inclusive, collecting events.
    fn run(
        countdown: &mut CountdownController,
        from: u64,
        to: u64,
        connected_at: Option<u64>,
    ) -> Vec<(u64, CountdownEvent)> {
        let mut events = Vec::new();
        for now in from..=to {
            let connected = connected_at.is_some_and(|t| now >= t);
            if let Some(event) = countdown.poll(now, &connected) {
                events.push((now, event));
            }
        }
        events
    }

    #[test]
    fn test_new_is_idle() {
        let countdown = controller(5);
        assert!(!countdown.is_started());
        assert_eq!(countdown.status(), CountdownStatus::Idle);
        assert_eq!(countdown.duration_secs(), 5);
        assert!(!countdown.scheduler().is_armed());
    }

    #[test]
    fn test_start_sets_deadline_and_arms() {
        let mut countdown = controller(5);
        countdown.start(1000);
        assert!(countdown.is_started());
        assert_eq!(countdown.deadline(), 6000);
        assert_eq!(countdown.scheduler().due_at(), Some(1000 + FRAME_INTERVAL_MS));
        assert_eq!(countdown.status(), CountdownStatus::Searching);
    }

    #[test]
    fn test_double_start_keeps_single_chain() {
        let mut countdown = controller(5);
        countdown.start(0);
        countdown.start(20);
        assert_eq!(countdown.deadline(), 5000);
        assert_eq!(countdown.scheduler().due_at(), Some(FRAME_INTERVAL_MS));

        let events = run(&mut countdown, 0, 1000, None);
        let ticks = events
            .iter()
            .filter(|(_, e)| matches!(e, CountdownEvent::Tick { .. }))
            .count();
        // One chain at 41 ms spacing: 41, 82, ..., 984
        assert_eq!(ticks, (1000 / FRAME_INTERVAL_MS) as usize);
    }

    #[test]
    fn test_configure_after_start_is_rejected() {
        let mut countdown = controller(5);
        countdown.start(0);
        assert_eq!(countdown.configure(30), Err(CountdownError::AlreadyStarted));
        assert_eq!(countdown.duration_secs(), 5);

        countdown.stop(100);
        assert_eq!(countdown.configure(30), Ok(()));
        assert_eq!(countdown.duration_secs(), 30);
    }

    #[test]
    fn test_stop_then_stray_tick_finishes_without_connection() {
        let mut countdown = controller(5);
        countdown.start(0);
        countdown.stop(500);
        assert!(!countdown.scheduler().is_armed());

        let event = countdown.tick(500, &false);
        assert_eq!(event, CountdownEvent::Finish { connected: false });
        assert!(!countdown.scheduler().is_armed());
        assert_eq!(countdown.poll(10_000, &false), None);
    }

    #[test]
    fn test_natural_expiry_finishes_once() {
        let mut countdown = controller(5);
        countdown.start(0);
        let events = run(&mut countdown, 0, 8000, None);

        let finishes: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, CountdownEvent::Finish { .. }))
            .collect();
        assert_eq!(finishes.len(), 1);
        let (at, event) = finishes[0];
        assert_eq!(*event, CountdownEvent::Finish { connected: false });
        assert!(*at >= 5000 && *at < 5000 + FRAME_INTERVAL_MS);
        assert_eq!(countdown.status(), CountdownStatus::NoConnection);
        assert_eq!(countdown.animation(), AnimationFrame::SETTLED);
    }

    #[test]
    fn test_cue_plays_once_per_second() {
        let mut countdown = controller(5);
        countdown.start(0);
        let events = run(&mut countdown, 0, 6000, None);
        let cues = events
            .iter()
            .filter(|(_, e)| matches!(e, CountdownEvent::Tick { play_cue: true, .. }))
            .count();
        assert_eq!(cues, 5);
    }

    #[test]
    fn test_last_tick_preemption_polls_bridge() {
        let mut countdown = controller(5);
        countdown.start(0);
        // Bridge reports connected well before the final window
        let events = run(&mut countdown, 0, 6000, Some(2000));

        let finish = events.iter().find(|(_, e)| matches!(e, CountdownEvent::Finish { .. }));
        let (at, event) = finish.copied().unwrap();
        assert_eq!(event, CountdownEvent::Finish { connected: true });
        assert!(at > 5000 - LAST_TICK_WINDOW_MS && at < 5000);
        assert_eq!(countdown.status(), CountdownStatus::Connected);
        assert_eq!(
            events
                .iter()
                .filter(|(_, e)| matches!(e, CountdownEvent::Finish { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_bridge_not_polled_outside_final_window() {
        let mut countdown = controller(5);
        countdown.start(0);
        let event = countdown.tick(1000, &true);
        assert!(matches!(event, CountdownEvent::Tick { remaining_ms: 4000, .. }));
        assert!(countdown.is_started());
    }

    #[test]
    fn test_finish_connected_push() {
        let mut countdown = controller(5);
        assert_eq!(countdown.finish_connected(0), None);

        countdown.start(0);
        assert_eq!(
            countdown.finish_connected(4900),
            Some(CountdownEvent::Finish { connected: true })
        );
        assert!(!countdown.is_started());
        assert!(!countdown.scheduler().is_armed());
        assert_eq!(countdown.finish_connected(4950), None);
    }

    #[test]
    fn test_tick_updates_animation() {
        let mut countdown = controller(5);
        countdown.start(0);
        countdown.tick(850, &false);
        // 4150 remaining -> 850 ms into the second
        assert_eq!(countdown.animation().opacity, crate::config::ALPHA_DELIMITER);
        assert_eq!(countdown.animation().vertical_offset, 0.0);
    }

    #[test]
    fn test_remaining_ms() {
        let mut countdown = controller(5);
        assert_eq!(countdown.remaining_ms(0), 0);
        countdown.start(0);
        assert_eq!(countdown.remaining_ms(1200), 3800);
        assert_eq!(countdown.remaining_ms(9000), 0);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut countdown = controller(2);
        countdown.start(0);
        run(&mut countdown, 0, 3000, None);
        assert!(!countdown.is_started());

        countdown.start(10_000);
        assert_eq!(countdown.deadline(), 12_000);
        assert_eq!(countdown.status(), CountdownStatus::Searching);
        assert_eq!(countdown.cue_state_for_test(), CueState::new());
    }

    #[test]
    fn test_huge_duration_saturates_instead_of_overflowing() {
        let config = DisplayConfig::new().with_countdown_secs(u64::MAX / 10);
        assert_eq!(config.validate(), Ok(()));
        let mut countdown = CountdownController::new(&config);
        assert_eq!(countdown.duration_secs(), u64::MAX / SECOND_MS);

        countdown.start(0);
        assert_eq!(countdown.deadline(), u64::MAX);
        let event = countdown.tick(FRAME_INTERVAL_MS, &false);
        assert!(matches!(event, CountdownEvent::Tick { .. }));
        assert!(countdown.is_started());
    }

    #[test]
    fn test_configure_max_duration_keeps_counting() {
        let mut countdown = controller(5);
        countdown.configure(u64::MAX).unwrap();
        countdown.start(0);
        assert_eq!(
            countdown.tick(FRAME_INTERVAL_MS, &false),
            CountdownEvent::Tick {
                remaining_ms: u64::MAX - FRAME_INTERVAL_MS,
                play_cue: true,
            }
        );
        assert!(countdown.scheduler().is_armed());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CountdownStatus::Searching.label(), "searching...");
        assert_eq!(CountdownStatus::NoConnection.label(), "no connection");
        assert_eq!(CountdownStatus::Connected.label(), "connected");
    }

    impl CountdownController {
        fn cue_state_for_test(&self) -> CueState { self.cue }
    }
}
