//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the core crate.

use std::time::Duration;

/// Host loop period. Shorter than a frame so scheduler deadlines are hit closely.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How often fake channel values are pushed while the sensor is connected.
pub const FEED_INTERVAL_MS: u64 = 500;

/// Countdown length used by the simulator.
pub const COUNTDOWN_SECS: u64 = 10;
