//! Headless overlay driver with a virtual clock.
//!
//! Transition completions are scheduled on a [`TransitionClock`] using the
//! configured slide duration and delivered when `wait` moves the clock past
//! them, the way a browser would fire `transitionend`.

use std::fmt::Write as _;
use std::time::Duration;

use mframe::widgets::presenter::RootState;
use mframe::{
    ClickEvent, Event, HeadlessPresenter, Instant, KeyEvent, MediaNode, Microframe, OpenRequest,
    OverlayConfig, TouchEvent, TransitionClock, TransitionToken,
};

use crate::script::Command;

/// Touch origin for scripted swipes.
const SWIPE_ORIGIN: (f32, f32) = (400.0, 300.0);

pub struct Driver {
    overlay: Microframe<HeadlessPresenter>,
    clock: TransitionClock<TransitionToken>,
    now: Instant,
}

impl Driver {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            overlay: Microframe::with_config(HeadlessPresenter::new(), config),
            clock: TransitionClock::new(),
            now: Instant::now(),
        }
    }

    /// Run one command. Returns a line describing what happened.
    pub fn run(&mut self, command: &Command) -> String {
        let report = match command {
            Command::Open { items, start } => {
                let request = gallery_request(*items, *start);
                let opened = self.overlay.open(request, self.now);
                format!("open: {}", if opened { "ok" } else { "rejected" })
            }
            Command::Key(code) => {
                let outcome = self
                    .overlay
                    .handle_event(&Event::Key(KeyEvent::new(*code)), self.now);
                format!(
                    "key {code:?}: {:?} prevent_default={}",
                    outcome.effect, outcome.prevent_default
                )
            }
            Command::Swipe { dx, dy } => {
                let (x, y) = SWIPE_ORIGIN;
                self.overlay
                    .handle_event(&Event::Touch(TouchEvent::start(x, y)), self.now);
                let outcome = self
                    .overlay
                    .handle_event(&Event::Touch(TouchEvent::end(x + dx, y + dy)), self.now);
                format!("swipe ({dx}, {dy}): {:?}", outcome.effect)
            }
            Command::Click(target) => {
                let outcome = self
                    .overlay
                    .handle_event(&Event::Click(ClickEvent::new(*target)), self.now);
                format!("click {target:?}: {:?}", outcome.effect)
            }
            Command::Wait(duration) => {
                let settled = self.advance_clock(*duration);
                format!("wait {}ms: {settled} completion(s)", duration.as_millis())
            }
            Command::Close => {
                let closed = self.overlay.close();
                format!("close: {}", if closed { "ok" } else { "not open" })
            }
            Command::Show => self.describe(),
        };
        self.schedule_played();
        report
    }

    /// Schedule completion signals for transitions started since the last
    /// call.
    fn schedule_played(&mut self) {
        let duration = self.overlay.config().transition.slide_duration;
        for token in self.overlay.presenter_mut().take_played() {
            self.clock.schedule(token, self.now, duration);
        }
        if !self.overlay.is_open() {
            self.clock.clear();
        }
    }

    /// Move the virtual clock forward. Returns how many completions were
    /// accepted.
    fn advance_clock(&mut self, by: Duration) -> usize {
        self.now += by;
        let accepted = self
            .clock
            .tick(self.now)
            .into_iter()
            .filter(|token| self.overlay.on_transition_end(*token))
            .count();
        self.overlay.tick(self.now);
        accepted
    }

    /// Human-readable scene summary.
    pub fn describe(&self) -> String {
        let scene = self.overlay.presenter().scene();
        let mut out = String::new();
        let root = match scene.root {
            RootState::Absent => "absent",
            RootState::Mounted => "mounted",
            RootState::Shown => "shown",
        };
        let _ = write!(
            out,
            "root={root} scroll_locked={} listeners(key={}, click={}, touch={})",
            scene.scroll_locked, scene.key_listeners, scene.click_listeners, scene.touch_listeners
        );
        if let Some(counter) = &scene.counter {
            let _ = write!(out, "\n  counter {counter}");
        }
        if let Some((text, visible)) = &scene.hint {
            let state = if *visible { "visible" } else { "hidden" };
            let _ = write!(out, "\n  hint {text:?} ({state})");
        }
        for panel in &scene.panels {
            let _ = write!(out, "\n  panel {} [{}]", panel.id().0, panel.class_names().join(" "));
            if let Some(source) = panel.source() {
                let _ = write!(out, " src=#{}", source.0);
            }
            if let Some(legend) = panel.legend() {
                let _ = write!(out, " legend={:?}", legend.text());
            }
        }
        out
    }

    /// Number of panels tagged `current`.
    #[cfg(test)]
    fn current_panels(&self) -> usize {
        self.overlay
            .presenter()
            .scene()
            .panels_with_role(mframe::PanelRole::Current)
            .count()
    }

    pub fn overlay(&self) -> &Microframe<HeadlessPresenter> {
        &self.overlay
    }
}

fn gallery_request(items: u64, start: usize) -> OpenRequest {
    let mut members: Vec<MediaNode> = (0..items)
        .map(|i| MediaNode::image(i, format!("photo-{i}.jpg")).alt(format!("Photo {}", i + 1)))
        .collect();
    if items == 1 {
        return OpenRequest::Single(members.remove(0));
    }
    OpenRequest::Gallery { members, start }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;

    fn run(script: &str) -> Driver {
        let mut driver = Driver::new(OverlayConfig::default());
        for command in parse(script).expect("valid script") {
            driver.run(&command);
        }
        driver
    }

    #[test]
    fn completions_arrive_after_slide_duration() {
        let mut driver = run("open 5 0\nright");
        assert!(driver.overlay().is_transitioning());
        assert!(driver.run(&Command::Wait(Duration::from_millis(299))).contains("0 completion"));
        assert!(driver.run(&Command::Wait(Duration::from_millis(1))).contains("1 completion"));
        assert!(!driver.overlay().is_transitioning());
        assert_eq!(driver.current_panels(), 1);
    }

    #[test]
    fn rapid_input_settles() {
        let driver = run("open 5 0\nright\nright\nswipe -80 4\nwait 1000");
        assert_eq!(driver.current_panels(), 1);
        assert_eq!(driver.overlay().position().map(|p| p.index), Some(3));
    }

    #[test]
    fn single_item_opens_without_gallery() {
        let driver = run("open 1");
        assert!(driver.overlay().is_open());
        assert!(!driver.overlay().is_gallery());
    }

    #[test]
    fn hint_hides_after_wait() {
        let driver = run("open 3 0\nwait 5000");
        assert!(driver.describe().contains("(hidden)"));
    }

    #[test]
    fn close_clears_pending_completions() {
        let driver = run("open 3 0\nright\nclose\nwait 1000");
        assert!(!driver.overlay().is_open());
        assert!(driver.describe().starts_with("root=absent"));
    }
}
