//! Display and layout configuration constants.
//!
//! The host reports the real surface size through
//! `SurfaceCoordinator::on_surface_changed`; these are the defaults used
//! before the first measure pass and by the simulator window.

// =============================================================================
// Display Configuration
// =============================================================================

/// Default surface width in pixels (640x360 head-mounted display).
pub const SCREEN_WIDTH: u32 = 640;

/// Default surface height in pixels.
pub const SCREEN_HEIGHT: u32 = 360;

// =============================================================================
// Readout Card Layout
// =============================================================================

/// Height reserved for the chronometer band at the top of the readout card.
pub const CHRONO_BAND_HEIGHT: u32 = 64;

/// Channel grid columns (ten channels laid out 2 x 5).
pub const CHANNEL_COLUMNS: u32 = 2;

/// Channel grid rows.
pub const CHANNEL_ROWS: u32 = 5;

/// Horizontal padding inside each channel cell.
pub const CELL_PADDING: i32 = 12;

/// Gap between a channel label baseline and its value baseline.
pub const LABEL_VALUE_GAP: i32 = 14;

// =============================================================================
// Countdown Card Layout
// =============================================================================

/// Distance of the card title from the top edge.
pub const TITLE_MARGIN_TOP: i32 = 40;
