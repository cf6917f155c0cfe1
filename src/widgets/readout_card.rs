//! Readout card: chronometer band over a 2 x 5 grid of channel cells.
//!
//! ```text
//! ┌───────────────────────────────┐
//! │           00:12:34            │  chronometer band
//! ├───────────────┬───────────────┤
//! │ TEMP          │ HUMIDITY      │
//! │ 21.4 C        │ 48 %          │
//! ├───────────────┼───────────────┤
//! │ ...           │ ...           │  five rows
//! └───────────────┴───────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text, TextStyleBuilder},
};
use heapless::String;

use super::primitives::{clear_bounds, draw_hline, draw_vline};
use crate::{
    capabilities::RenderTarget,
    config::{
        SCREEN_HEIGHT, SCREEN_WIDTH,
        layout::{CELL_PADDING, CHANNEL_COLUMNS, CHANNEL_ROWS, CHRONO_BAND_HEIGHT, LABEL_VALUE_GAP},
    },
    readout::ReadoutController,
    styles::{CENTERED, CHANNEL_LABEL_STYLE, CHANNEL_VALUE_STYLE, CHRONO_STYLE, LEFT_ALIGNED},
};

/// Render target for [`ReadoutController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadoutCard {
    bounds: Rectangle,
}

impl ReadoutCard {
    pub const fn new() -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
        }
    }

    /// Area assigned by the last layout pass.
    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.bounds }

    /// Height of the chronometer band, capped to the card height.
    fn band_height(&self) -> u32 { CHRONO_BAND_HEIGHT.min(self.bounds.size.height) }

    /// Size of one channel cell.
    fn cell_size(&self) -> Size {
        let grid_height = self.bounds.size.height - self.band_height();
        Size::new(
            self.bounds.size.width / CHANNEL_COLUMNS,
            grid_height / CHANNEL_ROWS,
        )
    }

    fn draw_chrono<D>(
        &self,
        model: &ReadoutController,
        canvas: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut text: String<12> = String::new();
        write!(text, "{}", model.chrono()).ok();

        let style = TextStyleBuilder::from(&CENTERED).baseline(Baseline::Middle).build();
        let center = self.bounds.top_left
            + Point::new(
                (self.bounds.size.width / 2) as i32,
                (self.band_height() / 2) as i32,
            );
        Text::with_text_style(&text, center, CHRONO_STYLE, style)
            .draw(canvas)
            .ok();
    }

    fn draw_grid<D>(
        &self,
        model: &ReadoutController,
        canvas: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let cell = self.cell_size();
        if cell.width == 0 || cell.height == 0 {
            return;
        }
        let grid_top = self.bounds.top_left + Point::new(0, self.band_height() as i32);
        let grid_height = cell.height * CHANNEL_ROWS;

        for row in 0..CHANNEL_ROWS {
            draw_hline(
                canvas,
                grid_top + Point::new(0, (row * cell.height) as i32),
                self.bounds.size.width,
            );
        }
        for col in 1..CHANNEL_COLUMNS {
            draw_vline(canvas, grid_top + Point::new((col * cell.width) as i32, 0), grid_height);
        }

        let label_top = TextStyleBuilder::from(&LEFT_ALIGNED).baseline(Baseline::Top).build();
        for (i, (channel, value)) in model.channels().iter().enumerate() {
            let i = i as u32;
            let origin = grid_top
                + Point::new(
                    ((i % CHANNEL_COLUMNS) * cell.width) as i32 + CELL_PADDING,
                    ((i / CHANNEL_COLUMNS) * cell.height) as i32 + 4,
                );

            Text::with_text_style(channel.label(), origin, CHANNEL_LABEL_STYLE, label_top)
                .draw(canvas)
                .ok();
            Text::with_text_style(
                value,
                origin + Point::new(0, LABEL_VALUE_GAP),
                CHANNEL_VALUE_STYLE,
                label_top,
            )
            .draw(canvas)
            .ok();
        }
    }
}

impl Default for ReadoutCard {
    fn default() -> Self { Self::new() }
}

impl RenderTarget for ReadoutCard {
    type Model = ReadoutController;

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
        model: &ReadoutController,
        canvas: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_bounds(canvas, self.bounds);
        self.draw_chrono(model, canvas);
        self.draw_grid(model, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ACCENT, WHITE};
    use crate::config::DisplayConfig;
    use crate::readout::Channel;
    use crate::testing::PixelCanvas;

    fn card() -> ReadoutCard {
        let mut card = ReadoutCard::new();
        let size = card.measure(SCREEN_WIDTH, SCREEN_HEIGHT);
        card.layout(Rectangle::new(Point::zero(), size));
        card
    }

    fn draw(model: &ReadoutController) -> PixelCanvas {
        let mut canvas = PixelCanvas::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        card().draw(model, &mut canvas);
        canvas
    }

    #[test]
    fn test_chrono_drawn_in_band() {
        let canvas = draw(&ReadoutController::new(&DisplayConfig::new()));
        assert!(canvas.count_color(ACCENT) > 0);
        assert!(canvas.lit_pixels_in_rows(0, CHRONO_BAND_HEIGHT) > 0);
    }

    #[test]
    fn test_channel_value_changes_pixels() {
        let mut model = ReadoutController::new(&DisplayConfig::new());
        let before = draw(&model).count_color(WHITE);
        model.set_channel(Channel::Temperature, "21.4 C");
        let after = draw(&model).count_color(WHITE);
        assert!(after > before);
    }

    #[test]
    fn test_chrono_text_changes_with_time() {
        let mut model = ReadoutController::new(&DisplayConfig::new());
        model.reset(0, 0);
        let zero = draw(&model);
        model.reset(0, 3_599_990);
        let late = draw(&model);
        assert_ne!(zero, late);
    }

    #[test]
    fn test_tiny_bounds_do_not_panic() {
        let mut card = ReadoutCard::new();
        card.layout(Rectangle::new(Point::zero(), Size::new(3, 2)));
        let mut canvas = PixelCanvas::new(3, 2);
        card.draw(&ReadoutController::new(&DisplayConfig::new()), &mut canvas);
    }
}
