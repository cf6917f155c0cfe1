//! Color palette for the head-mounted display.
//!
//! The display is see-through, so black is transparent to the wearer and
//! every card is drawn on a black background with bright foreground text.
//! Colors use the `RgbColor` trait constants where possible.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Background; transparent on the see-through display.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Primary text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Info-level log entries and the `connected` status.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Warn-level log entries.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Dim gray for channel labels and grid lines.
/// RGB565: (12, 24, 12) - roughly 40% brightness.
pub const GRAY: Rgb565 = Rgb565::new(12, 24, 12);

/// Muted red for the `no connection` status.
/// RGB565: (28, 12, 8)
pub const SOFT_RED: Rgb565 = Rgb565::new(28, 12, 8);

/// Cyan accent for the chronometer.
/// RGB565: (8, 56, 31)
pub const ACCENT: Rgb565 = Rgb565::new(8, 56, 31);
