#![forbid(unsafe_code)]

//! Gesture recognition: transforms raw touch events into semantic swipes.
//!
//! [`SwipeRecognizer`] is a small stateful processor. A touch-start records
//! the contact point; the matching touch-end computes the displacement and,
//! if it qualifies, emits a [`SemanticEvent::Swipe`].
//!
//! # Classification
//!
//! A displacement `(dx, dy)` is a swipe when both hold:
//!
//! 1. `|dx| > |dy|` (horizontal dominates), and
//! 2. `|dx| > min_distance` (default 50 host units).
//!
//! Anything else (taps, vertical scrolls, short drags) is ignored.
//!
//! # Invariants
//!
//! 1. A swipe is emitted at most once per touch-start.
//! 2. A touch-end with no recorded touch-start emits nothing.
//! 3. After `reset()` (or a touch-cancel) the recognizer is idle.
//!
//! # Failure Modes
//!
//! - Non-finite coordinates never classify as a swipe (comparisons with NaN
//!   are false).

use crate::event::{Event, TouchEventKind};
use crate::geometry::{Delta, Point};
use crate::semantic_event::{SemanticEvent, SwipeDirection};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default minimum horizontal travel for a swipe.
pub const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Thresholds for swipe recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Minimum horizontal travel, exclusive (default: 50.0).
    pub min_distance: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
        }
    }
}

impl SwipeConfig {
    /// Set the minimum horizontal travel.
    #[must_use]
    pub fn min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }
}

/// Classify a touch displacement.
///
/// Returns the direction the finger travelled if the displacement is a
/// navigational swipe under `config`, `None` otherwise.
#[must_use]
pub fn classify_swipe(delta: Delta, config: &SwipeConfig) -> Option<SwipeDirection> {
    if !delta.is_horizontal() || delta.dx.abs() <= config.min_distance {
        return None;
    }
    if delta.dx < 0.0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}

// ---------------------------------------------------------------------------
// SwipeRecognizer
// ---------------------------------------------------------------------------

/// Stateful swipe recognizer.
///
/// Feed every event to [`process`](SwipeRecognizer::process); non-touch
/// events are ignored except focus loss, which abandons a pending touch.
#[derive(Debug, Clone, Default)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    touch_start: Option<Point>,
}

impl SwipeRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            touch_start: None,
        }
    }

    /// Process a raw event, returning a swipe if one completed.
    pub fn process(&mut self, event: &Event) -> Option<SemanticEvent> {
        match event {
            Event::Touch(touch) => match touch.kind {
                TouchEventKind::Start => {
                    self.touch_start = Some(touch.pos);
                    None
                }
                TouchEventKind::End => {
                    let start = self.touch_start.take()?;
                    let delta = touch.pos.delta_from(start);
                    classify_swipe(delta, &self.config)
                        .map(|direction| SemanticEvent::Swipe { direction, delta })
                }
                TouchEventKind::Cancel => {
                    self.touch_start = None;
                    None
                }
            },
            Event::Focus(false) => {
                self.touch_start = None;
                None
            }
            _ => None,
        }
    }

    /// Whether a touch-start is waiting for its touch-end.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.touch_start.is_some()
    }

    /// Reset to idle.
    pub fn reset(&mut self) {
        self.touch_start = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: SwipeConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyCode, KeyEvent, TouchEvent};
    use crate::semantic_event::Direction;

    fn touch_start(x: f32, y: f32) -> Event {
        Event::Touch(TouchEvent::start(x, y))
    }

    fn touch_end(x: f32, y: f32) -> Event {
        Event::Touch(TouchEvent::end(x, y))
    }

    fn swipe(gr: &mut SwipeRecognizer, dx: f32, dy: f32) -> Option<SemanticEvent> {
        gr.process(&touch_start(200.0, 200.0));
        gr.process(&touch_end(200.0 + dx, 200.0 + dy))
    }

    #[test]
    fn left_swipe_requests_rightward_navigation() {
        let mut gr = SwipeRecognizer::default();
        let ev = swipe(&mut gr, -60.0, 5.0).expect("swipe");
        assert!(matches!(
            ev,
            SemanticEvent::Swipe {
                direction: SwipeDirection::Left,
                ..
            }
        ));
        assert_eq!(ev.navigation(), Some(Direction::Rightward));
    }

    #[test]
    fn right_swipe_requests_leftward_navigation() {
        let mut gr = SwipeRecognizer::default();
        let ev = swipe(&mut gr, 75.0, -10.0).expect("swipe");
        assert_eq!(ev.navigation(), Some(Direction::Leftward));
    }

    #[test]
    fn vertical_dominant_is_ignored() {
        let mut gr = SwipeRecognizer::default();
        assert_eq!(swipe(&mut gr, -60.0, 80.0), None);
    }

    #[test]
    fn short_travel_is_ignored() {
        let mut gr = SwipeRecognizer::default();
        assert_eq!(swipe(&mut gr, -30.0, 0.0), None);
    }

    #[test]
    fn threshold_is_exclusive() {
        let cfg = SwipeConfig::default();
        assert_eq!(classify_swipe(Delta::new(-50.0, 0.0), &cfg), None);
        assert_eq!(
            classify_swipe(Delta::new(-50.5, 0.0), &cfg),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn diagonal_tie_is_ignored() {
        let cfg = SwipeConfig::default();
        assert_eq!(classify_swipe(Delta::new(80.0, 80.0), &cfg), None);
    }

    #[test]
    fn nan_never_classifies() {
        let cfg = SwipeConfig::default();
        assert_eq!(classify_swipe(Delta::new(f32::NAN, 0.0), &cfg), None);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut gr = SwipeRecognizer::default();
        assert_eq!(gr.process(&touch_end(0.0, 0.0)), None);
    }

    #[test]
    fn one_swipe_per_touch_start() {
        let mut gr = SwipeRecognizer::default();
        gr.process(&touch_start(200.0, 0.0));
        assert!(gr.process(&touch_end(100.0, 0.0)).is_some());
        assert_eq!(gr.process(&touch_end(0.0, 0.0)), None);
    }

    #[test]
    fn cancel_resets_tracking() {
        let mut gr = SwipeRecognizer::default();
        gr.process(&touch_start(200.0, 0.0));
        assert!(gr.is_tracking());
        gr.process(&Event::Touch(TouchEvent::new(
            TouchEventKind::Cancel,
            0.0,
            0.0,
        )));
        assert!(!gr.is_tracking());
        assert_eq!(gr.process(&touch_end(0.0, 0.0)), None);
    }

    #[test]
    fn focus_loss_resets_tracking() {
        let mut gr = SwipeRecognizer::default();
        gr.process(&touch_start(200.0, 0.0));
        gr.process(&Event::Focus(false));
        assert!(!gr.is_tracking());
    }

    #[test]
    fn key_events_ignored() {
        let mut gr = SwipeRecognizer::default();
        gr.process(&touch_start(200.0, 0.0));
        assert_eq!(gr.process(&Event::Key(KeyEvent::new(KeyCode::Left))), None);
        assert!(gr.is_tracking());
    }

    #[test]
    fn custom_min_distance() {
        let mut gr = SwipeRecognizer::new(SwipeConfig::default().min_distance(10.0));
        assert!(swipe(&mut gr, 20.0, 0.0).is_some());

        gr.set_config(SwipeConfig::default().min_distance(100.0));
        assert_eq!(gr.config().min_distance, 100.0);
        assert_eq!(swipe(&mut gr, 80.0, 0.0), None);
    }

    #[test]
    fn reset_clears_state() {
        let mut gr = SwipeRecognizer::default();
        gr.process(&touch_start(0.0, 0.0));
        gr.reset();
        assert!(!gr.is_tracking());
    }

    #[test]
    fn default_config_values() {
        assert_eq!(SwipeConfig::default().min_distance, 50.0);
    }
}
