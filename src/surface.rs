//! Drawing surface capability and a double-buffered implementation.
//!
//! A frame is drawn by locking the surface's canvas, rendering into it and
//! then presenting it. [`CanvasLock`] ties the lock to a scope: if the frame
//! is not explicitly presented (early return, failed render), dropping the
//! guard discards it, so the canvas is released on every exit path.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::error::SurfaceError;

/// Host drawing surface with lock/present semantics.
pub trait DrawingSurface {
    /// Target the frame is rendered into.
    type Canvas: DrawTarget<Color = Rgb565>;

    /// Take exclusive access to the back canvas.
    fn lock_canvas(&mut self) -> Result<(), SurfaceError>;

    /// Back canvas. Only meaningful while locked.
    fn canvas_mut(&mut self) -> &mut Self::Canvas;

    /// Release the canvas and show what was drawn.
    fn unlock_and_present(&mut self);

    /// Release the canvas without showing it.
    fn unlock_and_discard(&mut self);
}

// =============================================================================
// Scoped Canvas Lock
// =============================================================================

/// Exclusive access to a surface's canvas for one frame.
pub struct CanvasLock<'a, S: DrawingSurface> {
    surface: &'a mut S,
    presented: bool,
}

impl<'a, S: DrawingSurface> CanvasLock<'a, S> {
    /// Lock the canvas, or report why it is not available.
    pub fn acquire(surface: &'a mut S) -> Result<Self, SurfaceError> {
        surface.lock_canvas()?;
        Ok(Self {
            surface,
            presented: false,
        })
    }

    /// Canvas to render into.
    #[inline]
    pub fn canvas(&mut self) -> &mut S::Canvas { self.surface.canvas_mut() }

    /// Present the frame and release the canvas.
    pub fn present(mut self) {
        self.surface.unlock_and_present();
        self.presented = true;
    }
}

impl<S: DrawingSurface> Drop for CanvasLock<'_, S> {
    fn drop(&mut self) {
        if !self.presented {
            self.surface.unlock_and_discard();
        }
    }
}

// =============================================================================
// Double Buffer
// =============================================================================

/// Two canvases: one being rendered, one last presented.
///
/// Presenting swaps them, so [`front`](Self::front) is always the last
/// complete frame and a discarded frame never becomes visible.
pub struct DoubleBuffer<C> {
    buffers: [C; 2],
    /// Index of the buffer currently being rendered to (0 or 1).
    render_idx: usize,
    locked: bool,
    released: bool,
    presented: u32,
    discarded: u32,
}

impl<C> DoubleBuffer<C>
where
    C: DrawTarget<Color = Rgb565>,
{
    /// Create a double buffer from two canvases of the same size.
    pub fn new(
        first: C,
        second: C,
    ) -> Self {
        Self {
            buffers: [first, second],
            render_idx: 0,
            locked: false,
            released: false,
            presented: 0,
            discarded: 0,
        }
    }

    /// Swap buffers after rendering completes.
    ///
    /// Returns the index of the buffer that was just rendered to.
    #[inline]
    pub fn swap(&mut self) -> usize {
        let completed_idx = self.render_idx;
        self.render_idx = 1 - self.render_idx;
        completed_idx
    }

    /// Last presented frame.
    #[inline]
    pub fn front(&self) -> &C { &self.buffers[1 - self.render_idx] }

    /// The host is tearing the surface down; every later lock fails.
    pub fn release(&mut self) {
        if self.locked {
            self.unlock_and_discard();
        }
        self.released = true;
    }

    #[inline]
    pub const fn is_released(&self) -> bool { self.released }

    #[inline]
    pub const fn is_locked(&self) -> bool { self.locked }

    #[inline]
    pub const fn render_idx(&self) -> usize { self.render_idx }

    /// Frames presented so far.
    #[inline]
    pub const fn presented_frames(&self) -> u32 { self.presented }

    /// Frames locked and then dropped without presenting.
    #[inline]
    pub const fn discarded_frames(&self) -> u32 { self.discarded }
}

impl<C> DrawingSurface for DoubleBuffer<C>
where
    C: DrawTarget<Color = Rgb565>,
{
    type Canvas = C;

    fn lock_canvas(&mut self) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Unavailable);
        }
        if self.locked {
            return Err(SurfaceError::Busy);
        }
        self.locked = true;
        Ok(())
    }

    fn canvas_mut(&mut self) -> &mut C { &mut self.buffers[self.render_idx] }

    fn unlock_and_present(&mut self) {
        if !self.locked {
            return;
        }
        self.locked = false;
        self.swap();
        self.presented = self.presented.wrapping_add(1);
    }

    fn unlock_and_discard(&mut self) {
        if !self.locked {
            return;
        }
        self.locked = false;
        self.discarded = self.discarded.wrapping_add(1);
    }
}
