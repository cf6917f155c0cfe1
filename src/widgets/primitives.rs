//! Low-level drawing primitives shared across widgets.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::colors::{BLACK, GRAY};

const BACKGROUND_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Blend `fg` over `bg` with opacity `alpha` in `[0, 1]`.
///
/// Operates on the raw 5-6-5 components with 8-bit fixed-point weights.
pub fn blend_rgb565(
    bg: Rgb565,
    fg: Rgb565,
    alpha: f32,
) -> Rgb565 {
    let bg_raw = bg.into_storage();
    let fg_raw = fg.into_storage();

    let bg_r = i32::from((bg_raw >> 11) & 0x1F);
    let bg_g = i32::from((bg_raw >> 5) & 0x3F);
    let bg_b = i32::from(bg_raw & 0x1F);

    let fg_r = i32::from((fg_raw >> 11) & 0x1F);
    let fg_g = i32::from((fg_raw >> 5) & 0x3F);
    let fg_b = i32::from(fg_raw & 0x1F);

    // Fixed-point: 8 bits fractional, rounded to nearest
    let t_fixed = (alpha.clamp(0.0, 1.0) * 256.0 + 0.5) as i32;
    let mix = |from: i32, to: i32| from + (((to - from) * t_fixed) >> 8);

    let r = mix(bg_r, fg_r).clamp(0, 31) as u8;
    let g = mix(bg_g, fg_g).clamp(0, 63) as u8;
    let b = mix(bg_b, fg_b).clamp(0, 31) as u8;

    Rgb565::new(r, g, b)
}

/// Clear `bounds` to the background color.
pub fn clear_bounds<D>(
    display: &mut D,
    bounds: Rectangle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    bounds.into_styled(BACKGROUND_STYLE).draw(display).ok();
}

/// Draw a one-pixel horizontal divider across `width` pixels.
pub fn draw_hline<D>(
    display: &mut D,
    start: Point,
    width: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if width == 0 {
        return;
    }
    Line::new(start, start + Point::new(width as i32 - 1, 0))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

/// Draw a one-pixel vertical divider down `height` pixels.
pub fn draw_vline<D>(
    display: &mut D,
    start: Point,
    height: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if height == 0 {
        return;
    }
    Line::new(start, start + Point::new(0, height as i32 - 1))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::testing::PixelCanvas;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend_rgb565(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(blend_rgb565(BLACK, WHITE, 1.0), WHITE);
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = blend_rgb565(BLACK, WHITE, 0.5);
        assert_eq!(mid.r(), 15);
        assert_eq!(mid.g(), 31);
        assert_eq!(mid.b(), 15);
    }

    #[test]
    fn test_blend_clamps_alpha() {
        assert_eq!(blend_rgb565(BLACK, WHITE, 2.0), WHITE);
        assert_eq!(blend_rgb565(BLACK, WHITE, -1.0), BLACK);
    }

    #[test]
    fn test_blend_is_monotonic() {
        let mut last = 0;
        for step in 0..=100 {
            let g = blend_rgb565(BLACK, WHITE, step as f32 / 100.0).g();
            assert!(g >= last);
            last = g;
        }
    }

    #[test]
    fn test_dividers() {
        let mut canvas = PixelCanvas::new(10, 10);
        draw_hline(&mut canvas, Point::new(0, 2), 10);
        draw_vline(&mut canvas, Point::new(5, 0), 10);
        assert_eq!(canvas.count_color(GRAY), 19);
        draw_hline(&mut canvas, Point::new(0, 8), 0);
        assert_eq!(canvas.count_color(GRAY), 19);

        clear_bounds(&mut canvas, Rectangle::new(Point::zero(), Size::new(10, 10)));
        assert_eq!(canvas.lit_pixels(), 0);
    }
}
