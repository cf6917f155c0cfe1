//! Elapsed-time chronometer, `MM:SS:CC`.

use core::fmt;

use crate::config::{MINUTE_MS, SECOND_MS};

/// Chronometer reading split into display fields.
///
/// Fields are truncated, never rounded: 1999 ms reads `00:01:99`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChronoReading {
    pub minutes: u16,
    pub seconds: u8,
    pub centis: u8,
}

impl ChronoReading {
    /// All zeros.
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
        centis: 0,
    };

    /// Split an elapsed duration after wrapping it at `wrap_ms`.
    ///
    /// A zero `wrap_ms` disables wrapping.
    pub fn from_elapsed(
        elapsed_ms: u64,
        wrap_ms: u64,
    ) -> Self {
        let wrapped = elapsed_ms.checked_rem(wrap_ms).unwrap_or(elapsed_ms);
        Self {
            minutes: (wrapped / MINUTE_MS).min(u64::from(u16::MAX)) as u16,
            seconds: ((wrapped % MINUTE_MS) / SECOND_MS) as u8,
            centis: ((wrapped % SECOND_MS) / 10) as u8,
        }
    }

    /// Reading for `now` relative to `base`. A base in the future reads zero.
    pub fn between(
        base_ms: u64,
        now_ms: u64,
        wrap_ms: u64,
    ) -> Self {
        Self::from_elapsed(now_ms.saturating_sub(base_ms), wrap_ms)
    }
}

impl fmt::Display for ChronoReading {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.centis)
    }
}
