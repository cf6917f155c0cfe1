//! Per-second status text easing for the countdown card.
//!
//! Every second of the countdown replays the same two-phase animation,
//! driven only by the position inside the current second:
//!
//! ```text
//! frame = 1000 - (remaining % 1000)          // 1..=1000 ms into the second
//!
//! frame <= 850:  factor  = frame / 850
//!                opacity = 0.95 * factor
//!                offset  = MAX_OFFSET * (1 - factor)
//!
//! frame >  850:  factor  = (frame - 850) / 150
//!                opacity = 0.95 + factor * 0.05
//!                offset  = 0
//! ```
//!
//! The text slides up into place while fading in to the delimiter, then
//! settles to full opacity for the rest of the second. Both curves meet at
//! the delimiter, so opacity and offset are continuous inside a second.

use crate::config::{DisplayConfig, SECOND_MS};

/// Easing parameters, copied out of [`DisplayConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Easing {
    /// Length of the slide-in phase within each second.
    pub transition_ms: u64,
    /// Opacity at the end of the slide-in phase.
    pub alpha_delimiter: f32,
    /// Offset at the start of the slide-in phase.
    pub max_offset_px: f32,
}

impl Easing {
    /// Extract the easing parameters from a configuration.
    pub const fn from_config(config: &DisplayConfig) -> Self {
        Self {
            transition_ms: config.transition_ms,
            alpha_delimiter: config.alpha_delimiter,
            max_offset_px: config.max_offset_px,
        }
    }
}

impl Default for Easing {
    fn default() -> Self { Self::from_config(&DisplayConfig::new()) }
}

/// Milliseconds elapsed inside the current countdown second, in `1..=1000`.
///
/// A remaining time that is an exact multiple of a second is the *end* of a
/// second (1000), not the start of the next one.
#[inline]
pub const fn frame_in_second(remaining_ms: u64) -> u64 { SECOND_MS - remaining_ms % SECOND_MS }

/// Visual state of the status text for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationFrame {
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Downward offset in pixels, in `[0, max_offset]`.
    pub vertical_offset: f32,
}

impl AnimationFrame {
    /// Fully shown, in place. Used once the countdown has finished.
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        vertical_offset: 0.0,
    };

    /// Compute the frame for a remaining countdown time.
    pub fn from_remaining(
        remaining_ms: u64,
        easing: &Easing,
    ) -> Self {
        let frame = frame_in_second(remaining_ms);
        let transition = easing.transition_ms;

        if frame <= transition {
            let factor = frame as f32 / transition as f32;
            Self {
                opacity: (factor * easing.alpha_delimiter).clamp(0.0, 1.0),
                vertical_offset: (easing.max_offset_px * (1.0 - factor)).max(0.0),
            }
        } else {
            let settle = (SECOND_MS - transition) as f32;
            let factor = (frame - transition) as f32 / settle;
            Self {
                opacity: (easing.alpha_delimiter + factor * (1.0 - easing.alpha_delimiter)).clamp(0.0, 1.0),
                vertical_offset: 0.0,
            }
        }
    }
}

impl Default for AnimationFrame {
    fn default() -> Self { Self::SETTLED }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::{ALPHA_DELIMITER, MAX_OFFSET_PX};

    fn frame_at(remaining_ms: u64) -> AnimationFrame { AnimationFrame::from_remaining(remaining_ms, &Easing::default()) }

    #[test]
    fn test_frame_in_second_range() {
        assert_eq!(frame_in_second(4999), 1);
        assert_eq!(frame_in_second(4001), 999);
        assert_eq!(frame_in_second(4000), 1000);
        assert_eq!(frame_in_second(150), 850);
    }

    #[test]
    fn test_delimiter_is_exact() {
        // 150 ms remaining in the second -> 850 ms into it
        let frame = frame_at(3150);
        assert_eq!(frame.opacity, ALPHA_DELIMITER);
        assert_eq!(frame.vertical_offset, 0.0);
    }

    #[test]
    fn test_start_of_second_is_nearly_transparent_and_low() {
        let frame = frame_at(2999);
        assert!(frame.opacity < 0.01);
        assert!(frame.vertical_offset > MAX_OFFSET_PX - 0.1);
    }

    #[test]
    fn test_end_of_second_is_opaque() {
        let frame = frame_at(3000);
        assert!((frame.opacity - 1.0).abs() < 1e-6);
        assert_eq!(frame.vertical_offset, 0.0);
    }

    #[test]
    fn test_settle_phase_has_no_offset() {
        for remaining in 3000..3150 {
            assert_eq!(frame_at(remaining).vertical_offset, 0.0);
        }
    }

    #[test]
    fn test_midpoint_of_slide_in() {
        // 425 ms into the second
        let frame = frame_at(2575);
        assert!((frame.opacity - ALPHA_DELIMITER / 2.0).abs() < 1e-4);
        assert!((frame.vertical_offset - MAX_OFFSET_PX / 2.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_values_stay_in_range(remaining in 0u64..120_000) {
            let frame = frame_at(remaining);
            prop_assert!((0.0..=1.0).contains(&frame.opacity));
            prop_assert!((0.0..=MAX_OFFSET_PX).contains(&frame.vertical_offset));
        }

        #[test]
        fn prop_continuous_within_a_second(seconds in 0u64..60, ms in 1u64..1000) {
            // `remaining` and `remaining - 1` sit in the same second for ms >= 1
            let remaining = seconds * SECOND_MS + ms;
            let a = frame_at(remaining);
            let b = frame_at(remaining - 1);
            let max_opacity_step = ALPHA_DELIMITER / 850.0 + (1.0 - ALPHA_DELIMITER) / 150.0 + 1e-5;
            let max_offset_step = MAX_OFFSET_PX / 850.0 + 1e-4;
            prop_assert!((a.opacity - b.opacity).abs() <= max_opacity_step);
            prop_assert!((a.vertical_offset - b.vertical_offset).abs() <= max_offset_step);
        }

        #[test]
        fn prop_opacity_never_decreases_within_a_second(seconds in 0u64..60, ms in 1u64..1000) {
            let remaining = seconds * SECOND_MS + ms;
            prop_assert!(frame_at(remaining - 1).opacity >= frame_at(remaining).opacity);
        }
    }
}
