//! Property-based invariant tests for swipe classification.
//!
//! 1. A classified swipe always has |dx| > |dy| and |dx| > min_distance.
//! 2. The finger direction matches the sign of dx.
//! 3. Mirroring dx mirrors the navigation direction.
//! 4. The recognizer agrees with the pure classifier for start/end pairs.
//! 5. Arbitrary event streams never panic and leave at most one pending touch.

use mframe_core::event::{Event, KeyCode, KeyEvent, TouchEvent, TouchEventKind};
use mframe_core::geometry::{Delta, Point};
use mframe_core::gesture::{SwipeConfig, SwipeRecognizer, classify_swipe};
use mframe_core::semantic_event::{SemanticEvent, SwipeDirection};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f32> {
    -2000.0f32..2000.0
}

fn min_distance() -> impl Strategy<Value = f32> {
    0.0f32..200.0
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| Event::Touch(TouchEvent::start(x, y))),
        (coord(), coord()).prop_map(|(x, y)| Event::Touch(TouchEvent::end(x, y))),
        (coord(), coord())
            .prop_map(|(x, y)| Event::Touch(TouchEvent::new(TouchEventKind::Cancel, x, y))),
        Just(Event::Focus(false)),
        Just(Event::Key(KeyEvent::new(KeyCode::Left))),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn swipe_requires_dominant_long_horizontal(dx in coord(), dy in coord(), min in min_distance()) {
        let cfg = SwipeConfig::default().min_distance(min);
        if let Some(dir) = classify_swipe(Delta::new(dx, dy), &cfg) {
            prop_assert!(dx.abs() > dy.abs());
            prop_assert!(dx.abs() > min);
            match dir {
                SwipeDirection::Left => prop_assert!(dx < 0.0),
                SwipeDirection::Right => prop_assert!(dx > 0.0),
            }
        } else {
            prop_assert!(dx.abs() <= dy.abs() || dx.abs() <= min);
        }
    }

    #[test]
    fn mirrored_swipe_mirrors_navigation(dx in coord(), dy in coord()) {
        let cfg = SwipeConfig::default();
        let a = classify_swipe(Delta::new(dx, dy), &cfg);
        let b = classify_swipe(Delta::new(-dx, dy), &cfg);
        match (a, b) {
            (Some(a), Some(b)) => {
                prop_assert_eq!(a.navigation().opposite(), b.navigation());
            }
            (None, None) => {}
            other => prop_assert!(false, "asymmetric classification: {:?}", other),
        }
    }

    #[test]
    fn recognizer_matches_classifier(
        sx in coord(), sy in coord(), ex in coord(), ey in coord()
    ) {
        let cfg = SwipeConfig::default();
        let mut gr = SwipeRecognizer::new(cfg);
        prop_assert_eq!(gr.process(&Event::Touch(TouchEvent::start(sx, sy))), None);
        let got = gr.process(&Event::Touch(TouchEvent::end(ex, ey)));
        let delta = Point::new(ex, ey).delta_from(Point::new(sx, sy));
        let expected = classify_swipe(delta, &cfg);
        match got {
            Some(SemanticEvent::Swipe { direction, .. }) => prop_assert_eq!(Some(direction), expected),
            None => prop_assert_eq!(expected, None),
        }
        prop_assert!(!gr.is_tracking());
    }

    #[test]
    fn arbitrary_streams_do_not_panic(events in prop::collection::vec(event_strategy(), 0..64)) {
        let mut gr = SwipeRecognizer::default();
        let mut swipes = 0usize;
        let mut starts = 0usize;
        for event in &events {
            if matches!(event, Event::Touch(t) if t.kind == TouchEventKind::Start) {
                starts += 1;
            }
            if gr.process(event).is_some() {
                swipes += 1;
            }
        }
        prop_assert!(swipes <= starts);
    }
}
