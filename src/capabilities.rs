//! Host-provided capabilities.
//!
//! The display core never talks to audio hardware, the sensor link or a
//! widget toolkit directly. The host hands in implementations of these traits
//! and the coordinator drives them.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Audio Cues
// =============================================================================

/// The two sounds the display plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// Short click once per countdown second.
    Tick,
    /// One-shot chime when the sensor connects.
    Connected,
}

/// Handle returned by [`CuePlayer::load_cue`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CueId(pub u16);

/// Fire-and-forget sound playback.
pub trait CuePlayer {
    /// Prepare a cue for playback and return its handle.
    fn load_cue(
        &mut self,
        cue: Cue,
    ) -> CueId;

    /// Start playing a loaded cue. Must not block.
    fn play(
        &mut self,
        id: CueId,
    );
}

// =============================================================================
// Connection Signal
// =============================================================================

/// Readiness of the sensor link, polled at the countdown's final tick.
pub trait ConnectionBridge {
    /// Whether the sensor service is currently connected.
    fn is_connected(&self) -> bool;
}

impl ConnectionBridge for bool {
    fn is_connected(&self) -> bool { *self }
}

impl<T: ConnectionBridge + ?Sized> ConnectionBridge for &T {
    fn is_connected(&self) -> bool { (**self).is_connected() }
}

// =============================================================================
// Render Targets
// =============================================================================

/// A view that can size itself and draw a model onto a canvas.
pub trait RenderTarget {
    /// State the view renders.
    type Model;

    /// Report the size the view wants inside `width` x `height`.
    fn measure(
        &mut self,
        width: u32,
        height: u32,
    ) -> Size;

    /// Place the view inside `bounds`.
    fn layout(
        &mut self,
        bounds: Rectangle,
    );

    /// Render `model` onto `canvas`. Individual primitive failures are ignored.
    fn draw<D>(
        &self,
        model: &Self::Model,
        canvas: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>;
}
