//! Test doubles for the host capabilities.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::capabilities::{ConnectionBridge, Cue, CueId, CuePlayer};

/// In-memory canvas that tolerates overdraw and out-of-bounds pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelCanvas {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl PixelCanvas {
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
        }
    }

    /// Number of pixels currently set to `color`.
    pub fn count_color(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Number of pixels that differ from black.
    pub fn lit_pixels(&self) -> usize { self.pixels.len() - self.count_color(Rgb565::BLACK) }

    /// Number of non-black pixels inside rows `top..bottom`.
    pub fn lit_pixels_in_rows(
        &self,
        top: u32,
        bottom: u32,
    ) -> usize {
        let width = self.size.width as usize;
        let bottom = bottom.min(self.size.height) as usize;
        self.pixels[top as usize * width..bottom * width]
            .iter()
            .filter(|&&p| p != Rgb565::BLACK)
            .count()
    }

    /// First row containing a non-black pixel.
    pub fn first_lit_row(&self) -> Option<u32> {
        let width = self.size.width as usize;
        self.pixels
            .chunks(width)
            .position(|row| row.iter().any(|&p| p != Rgb565::BLACK))
            .map(|row| row as u32)
    }
}

impl OriginDimensions for PixelCanvas {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for PixelCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.size.width && y < self.size.height {
                self.pixels[(y * self.size.width + x) as usize] = color;
            }
        }
        Ok(())
    }
}

/// Cue player that records every load and play.
#[derive(Debug, Default)]
pub struct RecordingCuePlayer {
    pub loaded: Vec<Cue>,
    pub played: Vec<Cue>,
}

impl RecordingCuePlayer {
    pub fn plays_of(
        &self,
        cue: Cue,
    ) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl CuePlayer for RecordingCuePlayer {
    fn load_cue(
        &mut self,
        cue: Cue,
    ) -> CueId {
        self.loaded.push(cue);
        CueId((self.loaded.len() - 1) as u16)
    }

    fn play(
        &mut self,
        id: CueId,
    ) {
        if let Some(&cue) = self.loaded.get(usize::from(id.0)) {
            self.played.push(cue);
        }
    }
}

/// Connection flag shared between a test and the coordinator that owns it.
#[derive(Clone, Debug, Default)]
pub struct SharedBridge(Rc<Cell<bool>>);

impl SharedBridge {
    pub fn set(
        &self,
        connected: bool,
    ) {
        self.0.set(connected);
    }
}

impl ConnectionBridge for SharedBridge {
    fn is_connected(&self) -> bool { self.0.get() }
}
