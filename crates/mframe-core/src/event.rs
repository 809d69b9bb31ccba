#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types the overlay receives from its host.
//! All events derive `Clone` and `PartialEq` for use in tests and pattern
//! matching.
//!
//! # Design Notes
//!
//! - Keys are identified by logical key name, never by scan code. Hosts
//!   that receive DOM-style names can use [`KeyCode::from_key_name`].
//! - Touch coordinates are `f32` in host units (CSS pixels on the web,
//!   cells in a terminal). Only deltas matter to the overlay.
//! - `KeyEventKind` defaults to `Press` when the host cannot tell.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A touch event (start, end, or cancel of a single-finger contact).
    Touch(TouchEvent),

    /// A click or tap landing on the overlay surface.
    Click(ClickEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this event should be acted upon (press or auto-repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.key` logical name.
    ///
    /// Single-character names map to [`KeyCode::Char`]. Unknown names
    /// return `None`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single-finger touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Phase of the touch.
    pub kind: TouchEventKind,

    /// Contact position in host units.
    pub pos: Point,
}

impl TouchEvent {
    /// Create a touch event.
    #[must_use]
    pub const fn new(kind: TouchEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Point::new(x, y),
        }
    }

    /// Touch-start at `(x, y)`.
    #[must_use]
    pub const fn start(x: f32, y: f32) -> Self {
        Self::new(TouchEventKind::Start, x, y)
    }

    /// Touch-end at `(x, y)`.
    #[must_use]
    pub const fn end(x: f32, y: f32) -> Self {
        Self::new(TouchEventKind::End, x, y)
    }
}

/// Phase of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    /// Finger made contact.
    Start,
    /// Finger lifted.
    End,
    /// Host aborted the touch (e.g. the browser took over for scrolling).
    Cancel,
}

/// A click on the overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Which part of the overlay received the click.
    pub target: ClickTarget,
}

impl ClickEvent {
    /// Create a click on the given target.
    #[must_use]
    pub const fn new(target: ClickTarget) -> Self {
        Self { target }
    }
}

/// Overlay region that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickTarget {
    /// The backdrop around the content.
    #[default]
    Backdrop,
    /// The media or legend of a panel.
    Content,
    /// Counter, hint, or other overlay chrome.
    Chrome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert_eq!(press.kind, KeyEventKind::Press);
        assert!(press.is_actionable());

        let release = press.with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
        assert!(!release.is_actionable());

        let repeat = press.with_kind(KeyEventKind::Repeat);
        assert!(repeat.is_actionable());
    }

    #[test]
    fn key_event_shift() {
        let event = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!KeyEvent::new(KeyCode::Tab).shift());
    }

    #[test]
    fn dom_key_names() {
        assert_eq!(KeyCode::from_key_name("Escape"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_key_name("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_key_name("ArrowRight"), Some(KeyCode::Right));
        assert_eq!(KeyCode::from_key_name("ArrowUp"), Some(KeyCode::Up));
        assert_eq!(KeyCode::from_key_name("ArrowDown"), Some(KeyCode::Down));
        assert_eq!(KeyCode::from_key_name("Tab"), Some(KeyCode::Tab));
        assert_eq!(KeyCode::from_key_name("h"), Some(KeyCode::Char('h')));
        assert_eq!(KeyCode::from_key_name("F13"), None);
        assert_eq!(KeyCode::from_key_name(""), None);
    }

    #[test]
    fn touch_constructors() {
        let start = TouchEvent::start(10.0, 20.0);
        assert_eq!(start.kind, TouchEventKind::Start);
        assert_eq!(start.pos, Point::new(10.0, 20.0));

        let end = TouchEvent::end(-3.5, 0.0);
        assert_eq!(end.kind, TouchEventKind::End);
        assert_eq!(end.pos.x, -3.5);
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn click_target_default() {
        assert_eq!(ClickTarget::default(), ClickTarget::Backdrop);
    }

    #[test]
    fn event_is_clone_and_eq() {
        let event = Event::Touch(TouchEvent::start(1.0, 2.0));
        let cloned = event.clone();
        assert_eq!(event, cloned);
    }
}
