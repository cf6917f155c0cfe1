//! Timing constants for the countdown and readout loops.
//!
//! All timestamps in this crate are milliseconds on a monotonic clock owned
//! by the host. Controllers never read a clock themselves; `now` is passed in.

// =============================================================================
// Frame Cadence
// =============================================================================

/// Tick period for both controllers (about 24 FPS).
pub const FRAME_INTERVAL_MS: u64 = 41;

/// One second in milliseconds. Easing and cue windows repeat every second.
pub const SECOND_MS: u64 = 1000;

// =============================================================================
// Countdown Easing
// =============================================================================

/// Point inside each second where the status text is fully slid in.
/// The remaining 150 ms fade the text from `ALPHA_DELIMITER` to fully opaque.
pub const TRANSITION_DURATION_MS: u64 = 850;

/// Opacity reached at the end of the slide-in phase.
pub const ALPHA_DELIMITER: f32 = 0.95;

/// Vertical offset of the status text at the start of each second (pixels).
pub const MAX_OFFSET_PX: f32 = 30.0;

/// Default countdown length before giving up on the sensor.
pub const DEFAULT_COUNTDOWN_SECS: u64 = 10;

/// Remaining time under which the final tick polls the connection bridge.
pub const LAST_TICK_WINDOW_MS: u64 = 100;

// =============================================================================
// Chronometer
// =============================================================================

/// Chronometer wraps back to zero after one hour.
pub const CHRONO_WRAP_MS: u64 = 60 * 60 * SECOND_MS;

/// Milliseconds per minute, used when splitting the chronometer value.
pub const MINUTE_MS: u64 = 60 * SECOND_MS;
