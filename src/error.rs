//! Error types.
//!
//! Nothing here is fatal. Surface errors are swallowed per frame by the
//! coordinator, countdown misuse is reported back to the caller, and config
//! errors surface once at construction.

use core::fmt;

/// Drawing surface could not hand out a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// The host tore the surface down (or is tearing it down).
    Unavailable,
    /// A canvas is already locked; a frame is still in flight.
    Busy,
}

impl fmt::Display for SurfaceError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("surface unavailable"),
            Self::Busy => f.write_str("canvas already locked"),
        }
    }
}

/// Misuse of the countdown controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownError {
    /// `configure` was called while the countdown is running.
    AlreadyStarted,
}

impl fmt::Display for CountdownError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::AlreadyStarted => f.write_str("countdown already started"),
        }
    }
}

/// Rejected [`DisplayConfig`](crate::config::DisplayConfig) value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame interval must be at least one millisecond.
    ZeroFrameInterval,
    /// Transition duration must lie strictly inside one second.
    TransitionOutOfRange,
    /// Alpha delimiter must lie in `[0, 1]`.
    AlphaDelimiterOutOfRange,
    /// Maximum vertical offset must be finite and non-negative.
    InvalidOffset,
    /// Chronometer wrap boundary must be non-zero.
    ZeroChronoWrap,
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let msg = match self {
            Self::ZeroFrameInterval => "frame interval must be non-zero",
            Self::TransitionOutOfRange => "transition duration must be within (0, 1000) ms",
            Self::AlphaDelimiterOutOfRange => "alpha delimiter must be within [0, 1]",
            Self::InvalidOffset => "max vertical offset must be finite and non-negative",
            Self::ZeroChronoWrap => "chronometer wrap must be non-zero",
        };
        f.write_str(msg)
    }
}
