#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mframe_core::event::{ClickEvent, ClickTarget, Event, KeyCode, KeyEvent, TouchEvent};
use mframe_widgets::media::MediaNode;
use mframe_widgets::panel::PanelRole;
use mframe_widgets::presenter::{HeadlessPresenter, RootState};
use mframe_widgets::router::OpenRequest;
use mframe_widgets::transition::TransitionToken;
use mframe_widgets::Microframe;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Op {
    Open { len: u8, start: u8 },
    Key(u8),
    Touch { start: (i16, i16), end: (i16, i16) },
    Click(u8),
    Advance(i8),
    /// Deliver a completion for one of the tokens seen so far.
    Complete(u8),
    Wait(u16),
    Close,
}

const KEYS: [KeyCode; 6] = [
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Escape,
    KeyCode::Tab,
    KeyCode::Up,
    KeyCode::Char(' '),
];

fuzz_target!(|ops: Vec<Op>| {
    let mut overlay = Microframe::new(HeadlessPresenter::new());
    let mut now = Instant::now();
    let mut tokens: Vec<TransitionToken> = Vec::new();

    for op in ops.into_iter().take(256) {
        match op {
            Op::Open { len, start } => {
                let len = u64::from(len % 8);
                let members = (0..len).map(|i| MediaNode::image(i, format!("{i}.jpg"))).collect();
                overlay.open(
                    OpenRequest::Gallery {
                        members,
                        start: usize::from(start % 10),
                    },
                    now,
                );
            }
            Op::Key(k) => {
                let code = KEYS[usize::from(k) % KEYS.len()];
                overlay.handle_event(&Event::Key(KeyEvent::new(code)), now);
            }
            Op::Touch { start, end } => {
                let (sx, sy) = (f32::from(start.0), f32::from(start.1));
                let (ex, ey) = (f32::from(end.0), f32::from(end.1));
                overlay.handle_event(&Event::Touch(TouchEvent::start(sx, sy)), now);
                overlay.handle_event(&Event::Touch(TouchEvent::end(ex, ey)), now);
            }
            Op::Click(t) => {
                let target = match t % 3 {
                    0 => ClickTarget::Backdrop,
                    1 => ClickTarget::Content,
                    _ => ClickTarget::Chrome,
                };
                overlay.handle_event(&Event::Click(ClickEvent::new(target)), now);
            }
            Op::Advance(offset) => {
                overlay.advance(isize::from(offset));
            }
            Op::Complete(i) => {
                if !tokens.is_empty() {
                    let token = tokens[usize::from(i) % tokens.len()];
                    overlay.on_transition_end(token);
                }
            }
            Op::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                overlay.tick(now);
            }
            Op::Close => {
                overlay.close();
            }
        }
        tokens.extend(overlay.presenter_mut().take_played());

        let scene = overlay.presenter().scene();
        if overlay.is_open() {
            assert_ne!(scene.root, RootState::Absent, "open overlay without root");
            assert!(scene.key_listeners <= 1, "duplicate key listeners");
            assert!(
                scene.panels_with_role(PanelRole::Current).count() <= 1,
                "more than one settled panel"
            );
            assert!(scene.panels.len() <= 2, "orphaned panels");
            if let Some(position) = overlay.position() {
                assert!(position.index < position.total, "index out of range");
            }
        } else {
            assert_eq!(scene.root, RootState::Absent, "root left behind");
            assert!(!scene.scroll_locked, "scroll left locked");
            assert_eq!(scene.key_listeners, 0, "listener leaked");
        }
    }
});
