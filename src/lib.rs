//! Display core for a head-mounted sensor companion.
//!
//! While the wearable searches for its paired environmental sensor it shows a
//! countdown card with an animated status line and a once-per-second tick
//! cue. When the sensor connects (or the countdown elapses) the display hands
//! off to a live readout card: an elapsed-time chronometer and ten channel
//! values, redrawn every frame.
//!
//! The crate is the platform-independent part. The host supplies a monotonic
//! clock (as `now` in milliseconds), a [`DrawingSurface`](surface::DrawingSurface),
//! a [`CuePlayer`](capabilities::CuePlayer) and a
//! [`ConnectionBridge`](capabilities::ConnectionBridge), then calls
//! [`SurfaceCoordinator::poll`] from its frame loop.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the library itself stays `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Must come first so the log macros are visible to every module below
mod fmt;

// === Configuration and errors ===
pub mod config;
pub mod error;

// === Timing and state machines ===
pub mod countdown;
pub mod readout;
pub mod scheduler;

// === Host seams ===
pub mod capabilities;
pub mod surface;

// === Rendering ===
pub mod colors;
pub mod styles;
pub mod widgets;

// === Orchestration ===
pub mod coordinator;
pub mod event_log;

#[cfg(test)]
mod testing;

pub use capabilities::{ConnectionBridge, Cue, CueId, CuePlayer, RenderTarget};
pub use config::DisplayConfig;
pub use coordinator::{Phase, SurfaceCoordinator};
pub use countdown::{CountdownController, CountdownEvent, CountdownStatus};
pub use error::{ConfigError, CountdownError, SurfaceError};
pub use readout::{Channel, ReadoutController, ReadoutEvent};
pub use surface::{CanvasLock, DoubleBuffer, DrawingSurface};
