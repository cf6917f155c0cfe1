//! Once-per-second audio cue guard.

use crate::config::SECOND_MS;
use crate::countdown::animation::frame_in_second;

/// Tracks which countdown second last played its cue.
///
/// A second is identified by `remaining / 1000`, which stays constant from the
/// first tick of a second (1 ms in) to its last (1000 ms in). The played flag
/// resets exactly when that index changes, and a cue is only allowed while the
/// tick lands inside the slide-in window of the second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CueState {
    last_whole_second: Option<u64>,
    played_this_second: bool,
}

impl CueState {
    /// Fresh guard; the first evaluated second may play.
    pub const fn new() -> Self {
        Self {
            last_whole_second: None,
            played_this_second: false,
        }
    }

    /// Decide whether this tick plays the cue, and record it if so.
    pub fn evaluate(
        &mut self,
        remaining_ms: u64,
        transition_ms: u64,
    ) -> bool {
        let whole_second = remaining_ms / SECOND_MS;
        if self.last_whole_second != Some(whole_second) {
            self.last_whole_second = Some(whole_second);
            self.played_this_second = false;
        }

        if self.played_this_second || frame_in_second(remaining_ms) > transition_ms {
            return false;
        }
        self.played_this_second = true;
        true
    }

    /// Forget the last second, e.g. when the countdown restarts.
    pub fn reset(&mut self) { *self = Self::new(); }

    /// Index of the last evaluated second.
    #[inline]
    pub const fn last_whole_second(&self) -> Option<u64> { self.last_whole_second }

    /// Whether the cue already played in the last evaluated second.
    #[inline]
    pub const fn played_this_second(&self) -> bool { self.played_this_second }
}
