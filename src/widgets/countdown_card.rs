//! Countdown card: title plus the animated connection status line.
//!
//! The status text is faded by blending its color toward the black
//! background (black is transparent on the see-through display) and slid
//! down by the animation's vertical offset.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::Text,
};

use super::primitives::{blend_rgb565, clear_bounds};
use crate::{
    capabilities::RenderTarget,
    colors::{BLACK, GREEN, SOFT_RED, WHITE},
    config::{SCREEN_HEIGHT, SCREEN_WIDTH, layout::TITLE_MARGIN_TOP},
    countdown::{CountdownController, CountdownStatus},
    styles::{CENTERED, STATUS_FONT, TITLE_STYLE},
};

/// Default card title.
pub const DEFAULT_TITLE: &str = "SENSOR";

/// Render target for [`CountdownController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownCard {
    bounds: Rectangle,
    title: &'static str,
}

impl CountdownCard {
    pub const fn new(title: &'static str) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            title,
        }
    }

    /// Area assigned by the last layout pass.
    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.bounds }

    const fn status_color(status: CountdownStatus) -> Rgb565 {
        match status {
            CountdownStatus::NoConnection => SOFT_RED,
            CountdownStatus::Connected => GREEN,
            CountdownStatus::Idle | CountdownStatus::Searching => WHITE,
        }
    }
}

impl Default for CountdownCard {
    fn default() -> Self { Self::new(DEFAULT_TITLE) }
}

impl RenderTarget for CountdownCard {
    type Model = CountdownController;

    fn measure(
        &mut self,
        width: u32,
        height: u32,
    ) -> Size {
        Size::new(width, height)
    }

    fn layout(
        &mut self,
        bounds: Rectangle,
    ) {
        self.bounds = bounds;
    }

    fn draw<D>(
        &self,
        model: &CountdownController,
        canvas: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_bounds(canvas, self.bounds);

        let top_left = self.bounds.top_left;
        let center_x = top_left.x + (self.bounds.size.width / 2) as i32;
        let center_y = top_left.y + (self.bounds.size.height / 2) as i32;

        Text::with_text_style(
            self.title,
            Point::new(center_x, top_left.y + TITLE_MARGIN_TOP),
            TITLE_STYLE,
            CENTERED,
        )
        .draw(canvas)
        .ok();

        let status = model.status();
        let label = status.label();
        if label.is_empty() {
            return;
        }

        let frame = model.animation();
        let color = blend_rgb565(BLACK, Self::status_color(status), frame.opacity);
        if color == BLACK {
            return;
        }
        let style = MonoTextStyle::new(STATUS_FONT, color);
        let position = Point::new(center_x, center_y + frame.vertical_offset as i32);

        Text::with_text_style(label, position, style, CENTERED)
            .draw(canvas)
            .ok();
    }
}
