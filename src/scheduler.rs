//! Fixed-interval frame scheduler.
//!
//! A [`FrameScheduler`] holds at most one pending invocation. The owning
//! controller arms it, the host loop polls it with the current time, and a
//! due poll hands control back to the owner's `tick`, which re-arms for the
//! next frame. Everything runs on one cooperative execution context, so there
//! is no locking and no callback storage: "the callback" is whichever
//! controller owns the scheduler.
//!
//! ```text
//! arm(now) ──► pending(due = now + interval) ──poll(now >= due)──► idle ──► owner.tick() ──► arm(now)
//!                    │
//!                 disarm()
//!                    ▼
//!                  idle
//! ```

/// Single-slot repeating timer driven by an external monotonic clock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameScheduler {
    /// Delay between an `arm` and the invocation it schedules.
    interval_ms: u64,

    /// Deadline of the pending invocation, if any.
    due_at: Option<u64>,
}

impl FrameScheduler {
    /// Create an idle scheduler with the given frame interval.
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            due_at: None,
        }
    }

    /// Schedule one invocation `interval_ms` after `now`.
    ///
    /// No-op while already armed. Returns `true` if this call armed it.
    pub fn arm(
        &mut self,
        now: u64,
    ) -> bool {
        self.arm_at(now.saturating_add(self.interval_ms))
    }

    /// Schedule one invocation due at `now` (the next poll fires).
    ///
    /// No-op while already armed. Returns `true` if this call armed it.
    pub fn arm_immediate(
        &mut self,
        now: u64,
    ) -> bool {
        self.arm_at(now)
    }

    fn arm_at(
        &mut self,
        due: u64,
    ) -> bool {
        if self.due_at.is_some() {
            return false;
        }
        self.due_at = Some(due);
        true
    }

    /// Cancel the pending invocation. Returns `true` if one was pending.
    pub fn disarm(&mut self) -> bool { self.due_at.take().is_some() }

    /// Returns `true` exactly once when the pending invocation is due.
    ///
    /// A due poll leaves the scheduler idle; the owner re-arms from its tick.
    pub fn poll(
        &mut self,
        now: u64,
    ) -> bool {
        if let Some(due) = self.due_at
            && now >= due
        {
            self.due_at = None;
            return true;
        }
        false
    }

    /// Whether an invocation is pending.
    #[inline]
    pub const fn is_armed(&self) -> bool { self.due_at.is_some() }

    /// Deadline of the pending invocation.
    #[inline]
    pub const fn due_at(&self) -> Option<u64> { self.due_at }

    /// Configured frame interval.
    #[inline]
    pub const fn interval_ms(&self) -> u64 { self.interval_ms }
}
