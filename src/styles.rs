//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are const-constructible in
//! embedded-graphics 0.8, so the fixed-color styles live in read-only data
//! and widgets reference them instead of rebuilding them every frame.
//!
//! The countdown status text fades, so its color varies per frame. For that
//! case the font is exposed as [`STATUS_FONT`] and callers build
//! `MonoTextStyle::new(STATUS_FONT, color)` with only the color changing.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{ACCENT, GRAY, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for titles, status text and the chronometer.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for channel labels and values.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Countdown status font (`ProFont` 18pt).
pub const STATUS_FONT: &MonoFont = &PROFONT_18_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Card title above the countdown status.
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large chronometer digits (`ProFont` 24pt).
pub const CHRONO_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, ACCENT);

/// Small dim channel labels (6x10 pixels).
pub const CHANNEL_LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Channel values (10x20 pixels).
pub const CHANNEL_VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);
