//! Concrete render targets for the two cards.
//!
//! - [`countdown_card`]: Card title plus the fading, sliding status line
//! - [`readout_card`]: Chronometer band and the 2 x 5 channel grid
//! - [`primitives`]: Shared low-level drawing utilities
//!
//! Each card clears its own bounds before drawing, so a frame never shows
//! leftovers from the other card. Individual primitive failures are ignored
//! with `.ok()`; a partially drawn frame is still presented.

pub mod countdown_card;
pub mod primitives;
pub mod readout_card;

pub use countdown_card::CountdownCard;
pub use readout_card::ReadoutCard;
