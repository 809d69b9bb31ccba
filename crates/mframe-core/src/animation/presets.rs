#![forbid(unsafe_code)]

//! Ready-to-use transition styles.
//!
//! | Preset | Description |
//! |--------|-------------|
//! | [`slide`] | Flat horizontal slide, full viewport offset |
//! | [`deck`] | Shorter slide with scale-down and rotation, like a card deck |
//! | [`tilt`] | Slide with a perspective tilt |
//! | [`instant`] | No motion; completes immediately (reduced motion) |

use std::time::Duration;

use super::{Easing, TransitionStyle};

/// Flat horizontal slide.
#[must_use]
pub fn slide() -> TransitionStyle {
    TransitionStyle::default()
}

/// Card-deck hand-off: staged panels sit closer, smaller, and rotated.
#[must_use]
pub fn deck() -> TransitionStyle {
    TransitionStyle::default()
        .slide_duration(Duration::from_millis(450))
        .panel_offset(0.6)
        .scale(0.85)
        .rotation(8.0)
        .easing(Easing::EaseInOut)
}

/// Slide with perspective tilt.
#[must_use]
pub fn tilt() -> TransitionStyle {
    TransitionStyle::default()
        .slide_duration(Duration::from_millis(400))
        .panel_offset(0.8)
        .tilt(25.0)
}

/// Reduced-motion style: every transition settles on the next tick.
#[must_use]
pub fn instant() -> TransitionStyle {
    TransitionStyle::default()
        .slide_duration(Duration::ZERO)
        .fade_duration(Duration::ZERO)
        .easing(Easing::Linear)
}

/// Look up a preset by name (`slide`, `deck`, `tilt`, `instant`).
#[must_use]
pub fn by_name(name: &str) -> Option<TransitionStyle> {
    match name {
        "slide" => Some(slide()),
        "deck" => Some(deck()),
        "tilt" => Some(tilt()),
        "instant" => Some(instant()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_is_instant() {
        assert!(instant().is_instant());
        assert!(!deck().is_instant());
    }

    #[test]
    fn deck_stages_smaller_panels() {
        let style = deck();
        assert!(style.scale < 1.0);
        assert!(style.panel_offset < 1.0);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("slide"), Some(slide()));
        assert_eq!(by_name("tilt"), Some(tilt()));
        assert_eq!(by_name("wobble"), None);
    }
}
