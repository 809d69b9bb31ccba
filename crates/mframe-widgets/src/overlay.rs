#![forbid(unsafe_code)]

//! Overlay lifecycle and input dispatch.
//!
//! [`Microframe`] owns a [`Presenter`] and at most one open session. A
//! session shows either a single element or a gallery; gallery sessions add
//! a navigator, the position counter, the navigation hint, and swipe
//! recognition.
//!
//! # Lifecycle
//!
//! ```text
//!            open(request)              close() / Escape / overlay click
//!  Closed ─────────────────▶ Open ─────────────────────────────────────▶ Closed
//!             │
//!             └─ rejected while a session exists
//! ```
//!
//! Opening locks page scroll, mounts the root and the first panel,
//! attaches the session listeners, forces a reflow, and only then shows the
//! root so the fade-in animates. Closing detaches every session listener
//! before anything else, settles any in-flight transition, dismisses the
//! root, and unlocks scroll.
//!
//! # Invariants
//!
//! 1. At most one session exists; scroll is locked exactly once per session
//!    and unlocked exactly once.
//! 2. Listeners attached by a session are detached by the same session.
//! 3. All state changes happen synchronously inside one call; completions
//!    arrive later through [`Microframe::on_transition_end`].

use mframe_core::animation::TransitionStyle;
use mframe_core::event::{ClickTarget, Event};
use mframe_core::gesture::{SwipeConfig, SwipeRecognizer};
use mframe_core::keybinding::{KeyAction, KeyMap};
use mframe_core::semantic_event::Direction;
use web_time::Instant;

use crate::chrome::{Counter, HintConfig, InputModality, NavHint};
use crate::media::{MediaItem, MediaNode};
use crate::navigator::{Advance, GalleryNavigator, Position};
use crate::panel::Panel;
use crate::presenter::{Listeners, Presenter};
use crate::router::{OpenRequest, route_click};
use crate::transition::{TransitionEngine, TransitionToken};

/// Overlay configuration.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Transition parameters handed to the presenter.
    pub transition: TransitionStyle,
    /// Swipe recognition thresholds.
    pub swipe: SwipeConfig,
    /// Navigation hint.
    pub hint: HintConfig,
    /// Key bindings while open.
    pub keys: KeyMap,
    /// Whether clicks on the content (not just the backdrop) close the
    /// overlay (default: true).
    pub close_on_content_click: bool,
    /// Input modality used to pick the hint text.
    pub modality: InputModality,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            transition: TransitionStyle::default(),
            swipe: SwipeConfig::default(),
            hint: HintConfig::default(),
            keys: KeyMap::default(),
            close_on_content_click: true,
            modality: InputModality::default(),
        }
    }
}

impl OverlayConfig {
    pub fn transition(mut self, style: TransitionStyle) -> Self {
        self.transition = style;
        self
    }

    pub fn swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    pub fn hint(mut self, hint: HintConfig) -> Self {
        self.hint = hint;
        self
    }

    pub fn keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    pub fn close_on_content_click(mut self, close: bool) -> Self {
        self.close_on_content_click = close;
        self
    }

    pub fn modality(mut self, modality: InputModality) -> Self {
        self.modality = modality;
        self
    }
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    /// Nothing changed.
    #[default]
    None,
    /// The overlay closed.
    Closed,
    /// A navigation was attempted; see [`Advance::accepted`].
    Navigation(Advance),
}

/// Result of [`Microframe::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Whether the host should suppress the event's default action.
    pub prevent_default: bool,
    /// What the event did.
    pub effect: Effect,
}

impl EventOutcome {
    /// Not handled.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        effect: Effect::None,
    };

    const fn consumed(effect: Effect) -> Self {
        Self {
            prevent_default: true,
            effect,
        }
    }

    const fn passive(effect: Effect) -> Self {
        Self {
            prevent_default: false,
            effect,
        }
    }
}

/// Gallery-only session state.
#[derive(Debug, Clone)]
struct GallerySession {
    navigator: GalleryNavigator,
    counter: Counter,
    hint: Option<NavHint>,
    swipe: SwipeRecognizer,
}

/// State of an open overlay.
#[derive(Debug, Clone)]
struct OverlaySession {
    engine: TransitionEngine,
    listeners: Listeners,
    gallery: Option<GallerySession>,
}

/// Overlay controller.
#[derive(Debug)]
pub struct Microframe<P: Presenter> {
    presenter: P,
    config: OverlayConfig,
    session: Option<OverlaySession>,
}

impl<P: Presenter> Microframe<P> {
    /// Controller with the default configuration.
    pub fn new(presenter: P) -> Self {
        Self::with_config(presenter, OverlayConfig::default())
    }

    pub fn with_config(presenter: P, config: OverlayConfig) -> Self {
        Self {
            presenter,
            config,
            session: None,
        }
    }

    /// Open the overlay.
    ///
    /// Returns `false`, touching nothing, when a session is already open or
    /// a gallery request's start index does not address a member.
    pub fn open(&mut self, request: OpenRequest, now: Instant) -> bool {
        if self.session.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "mframe::overlay", "open rejected: already open");
            return false;
        }

        let (first, mut gallery) = match request {
            OpenRequest::Single(node) => (MediaItem::capture(&node), None),
            OpenRequest::Gallery { members, start } => {
                let items = members.iter().map(MediaItem::capture).collect();
                let Some(navigator) = GalleryNavigator::new(items, start) else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        target: "mframe::overlay",
                        start,
                        len = members.len(),
                        "open rejected: start out of range"
                    );
                    return false;
                };
                let Some(first) = navigator.current_item().cloned() else {
                    return false;
                };
                let gallery = GallerySession {
                    counter: Counter::new(navigator.position()),
                    hint: self
                        .config
                        .hint
                        .enabled
                        .then(|| NavHint::new(&self.config.hint, self.config.modality)),
                    swipe: SwipeRecognizer::new(self.config.swipe),
                    navigator,
                };
                (first, Some(gallery))
            }
        };

        let presenter = &mut self.presenter;
        presenter.lock_scroll();
        presenter.mount_root(&self.config.transition);

        let mut engine = TransitionEngine::new();
        engine.mount(&first, presenter);

        let mut listeners = Listeners::KEYDOWN | Listeners::CLICK;
        if gallery.is_some() {
            listeners |= Listeners::TOUCH;
        }
        presenter.attach_listeners(listeners);

        if let Some(g) = &gallery {
            presenter.set_counter(g.counter.text());
            if let Some(hint) = &g.hint {
                presenter.set_hint(hint.text(), false);
            }
        }

        presenter.reflow();
        presenter.show_root();

        if let Some(hint) = gallery.as_mut().and_then(|g| g.hint.as_mut())
            && hint.show(now)
        {
            presenter.set_hint(hint.text(), true);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "mframe::overlay",
            gallery = gallery.is_some(),
            index = gallery.as_ref().map(|g| g.navigator.current_index()),
            len = gallery.as_ref().map_or(1, |g| g.navigator.len()),
            "overlay open"
        );

        self.session = Some(OverlaySession {
            engine,
            listeners,
            gallery,
        });
        true
    }

    /// Open whatever a page click routes to.
    ///
    /// Page clicks are ignored while the overlay is open. See
    /// [`route_click`] for the path convention.
    pub fn handle_page_click(&mut self, path: &[&MediaNode], now: Instant) -> bool {
        if self.session.is_some() {
            return false;
        }
        match route_click(path) {
            Some(request) => self.open(request, now),
            None => false,
        }
    }

    /// Close the overlay. Returns `false` if it was not open.
    pub fn close(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        let presenter = &mut self.presenter;

        presenter.detach_listeners(session.listeners);
        let _interrupted = session.engine.settle(presenter);
        presenter.dismiss_root();
        session.engine.forget();
        presenter.unlock_scroll();

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "mframe::overlay",
            interrupted = _interrupted,
            "overlay closed"
        );
        true
    }

    /// Move through the gallery by `offset`.
    ///
    /// Rejected (with no side effects) outside gallery mode, for a zero
    /// offset, and for destinations outside the gallery.
    pub fn advance(&mut self, offset: isize) -> Advance {
        let Some(session) = self.session.as_mut() else {
            return Advance::rejected(0);
        };
        let Some(gallery) = session.gallery.as_mut() else {
            return Advance::rejected(0);
        };

        let advance = gallery.navigator.advance(offset);
        let (Some(direction), Some(item)) = (
            Direction::from_offset(offset).filter(|_| advance.accepted),
            gallery.navigator.current_item(),
        ) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "mframe::overlay",
                offset,
                index = advance.old_index,
                "navigation rejected"
            );
            return advance;
        };

        let presenter = &mut self.presenter;
        let _token = session.engine.begin(item, direction, presenter);

        if gallery.counter.update(gallery.navigator.position()) {
            presenter.set_counter(gallery.counter.text());
        }
        if let Some(hint) = gallery.hint.as_mut()
            && hint.hide()
        {
            presenter.set_hint(hint.text(), false);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "mframe::overlay",
            from = advance.old_index,
            to = advance.new_index,
            direction = direction.as_str(),
            token = _token.get(),
            "navigation accepted"
        );
        advance
    }

    /// Dispatch an input event delivered to the open overlay.
    ///
    /// Time-based chrome is brought up to `now` first.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> EventOutcome {
        self.tick(now);
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::IGNORED;
        };

        match event {
            Event::Key(key) => {
                let Some(action) = self.config.keys.resolve(key) else {
                    return EventOutcome::IGNORED;
                };
                match action {
                    KeyAction::Close => {
                        self.close();
                        EventOutcome::consumed(Effect::Closed)
                    }
                    KeyAction::TrapFocus | KeyAction::BlockScroll => {
                        EventOutcome::consumed(Effect::None)
                    }
                    KeyAction::Navigate(direction) => {
                        if session.gallery.is_none() {
                            return EventOutcome::consumed(Effect::None);
                        }
                        let advance = self.advance(direction.offset());
                        EventOutcome::consumed(Effect::Navigation(advance))
                    }
                }
            }
            Event::Touch(_) | Event::Focus(_) => {
                let Some(gallery) = session.gallery.as_mut() else {
                    return EventOutcome::IGNORED;
                };
                let Some(swipe) = gallery.swipe.process(event) else {
                    return EventOutcome::IGNORED;
                };
                match swipe.navigation() {
                    Some(direction) => {
                        let advance = self.advance(direction.offset());
                        EventOutcome::passive(Effect::Navigation(advance))
                    }
                    None => EventOutcome::IGNORED,
                }
            }
            Event::Click(click) => {
                let closes = match click.target {
                    ClickTarget::Backdrop => true,
                    ClickTarget::Content | ClickTarget::Chrome => {
                        self.config.close_on_content_click
                    }
                };
                if closes {
                    self.close();
                    EventOutcome::passive(Effect::Closed)
                } else {
                    EventOutcome::IGNORED
                }
            }
        }
    }

    /// Completion signal from the presenter. Stale tokens are ignored.
    pub fn on_transition_end(&mut self, token: TransitionToken) -> bool {
        match self.session.as_mut() {
            Some(session) => session.engine.complete(token, &mut self.presenter),
            None => false,
        }
    }

    /// Advance time-based chrome. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(hint) = self
            .session
            .as_mut()
            .and_then(|s| s.gallery.as_mut())
            .and_then(|g| g.hint.as_mut())
        else {
            return false;
        };
        if hint.tick(now) {
            self.presenter.set_hint(hint.text(), false);
            return true;
        }
        false
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session
            .as_ref()
            .and_then(|s| s.gallery.as_ref())
            .and_then(|g| g.hint.as_ref())
            .and_then(NavHint::deadline)
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the open session is a gallery.
    pub fn is_gallery(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.gallery.is_some())
    }

    /// Gallery position, `None` outside gallery mode.
    pub fn position(&self) -> Option<Position> {
        self.session
            .as_ref()
            .and_then(|s| s.gallery.as_ref())
            .map(|g| g.navigator.position())
    }

    /// Whether the navigation hint is currently visible.
    pub fn hint_visible(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.gallery.as_ref())
            .and_then(|g| g.hint.as_ref())
            .is_some_and(NavHint::is_visible)
    }

    /// The panel showing the most recently requested content.
    pub fn current_panel(&self) -> Option<&Panel> {
        self.session.as_ref().and_then(|s| s.engine.visible_panel())
    }

    /// Token of the in-flight transition, if any.
    pub fn live_token(&self) -> Option<TransitionToken> {
        self.session.as_ref().and_then(|s| s.engine.live_token())
    }

    pub fn is_transitioning(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.engine.is_transitioning())
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replace the configuration. Applies from the next open.
    pub fn set_config(&mut self, config: OverlayConfig) {
        self.config = config;
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}
