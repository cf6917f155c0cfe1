//! Application configuration.
//!
//! - `timing`: Frame cadence, easing and chronometer constants
//! - `layout`: Default surface dimensions and card layout constants
//!
//! The constants are the compile-time defaults. [`DisplayConfig`] carries the
//! runtime-configurable subset so a host can tune the countdown without
//! rebuilding.

pub mod layout;
pub mod timing;

pub use layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use timing::{
    ALPHA_DELIMITER,
    CHRONO_WRAP_MS,
    DEFAULT_COUNTDOWN_SECS,
    FRAME_INTERVAL_MS,
    LAST_TICK_WINDOW_MS,
    MAX_OFFSET_PX,
    MINUTE_MS,
    SECOND_MS,
    TRANSITION_DURATION_MS,
};

use crate::error::ConfigError;

/// Runtime configuration for the countdown and readout controllers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Countdown length in whole seconds.
    pub countdown_secs: u64,
    /// Tick period shared by both controllers.
    pub frame_interval_ms: u64,
    /// Point inside each second where the status text is fully faded in.
    pub transition_ms: u64,
    /// Opacity reached at `transition_ms`.
    pub alpha_delimiter: f32,
    /// Vertical offset of the status text at the start of each second.
    pub max_offset_px: f32,
    /// Chronometer wrap boundary.
    pub chrono_wrap_ms: u64,
}

impl DisplayConfig {
    /// Configuration built from the compile-time defaults.
    pub const fn new() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            transition_ms: TRANSITION_DURATION_MS,
            alpha_delimiter: ALPHA_DELIMITER,
            max_offset_px: MAX_OFFSET_PX,
            chrono_wrap_ms: CHRONO_WRAP_MS,
        }
    }

    /// Override the countdown length.
    #[must_use]
    pub const fn with_countdown_secs(
        mut self,
        secs: u64,
    ) -> Self {
        self.countdown_secs = secs;
        self
    }

    /// Override the tick period.
    #[must_use]
    pub const fn with_frame_interval_ms(
        mut self,
        interval_ms: u64,
    ) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if self.transition_ms == 0 || self.transition_ms >= SECOND_MS {
            return Err(ConfigError::TransitionOutOfRange);
        }
        if !(0.0..=1.0).contains(&self.alpha_delimiter) {
            return Err(ConfigError::AlphaDelimiterOutOfRange);
        }
        if !self.max_offset_px.is_finite() || self.max_offset_px < 0.0 {
            return Err(ConfigError::InvalidOffset);
        }
        if self.chrono_wrap_ms == 0 {
            return Err(ConfigError::ZeroChronoWrap);
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self { Self::new() }
}
