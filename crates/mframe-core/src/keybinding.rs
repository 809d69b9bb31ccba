#![forbid(unsafe_code)]

//! Key-to-action mapping for the overlay.
//!
//! While an overlay is open it owns the page's key listener. Every key it
//! recognizes has its default prevented so the page underneath neither
//! scrolls nor steals focus; a subset of keys also carry an action.
//!
//! # Default bindings
//!
//! | Key | Action |
//! |-----|--------|
//! | Escape | [`KeyAction::Close`] |
//! | Tab, Shift+Tab | [`KeyAction::TrapFocus`] |
//! | Up, Down | [`KeyAction::BlockScroll`] |
//! | Left | [`KeyAction::Navigate`]`(Leftward)` |
//! | Right | [`KeyAction::Navigate`]`(Rightward)` |
//!
//! # Example
//!
//! ```
//! use mframe_core::event::{KeyCode, KeyEvent};
//! use mframe_core::keybinding::{KeyAction, KeyMap};
//! use mframe_core::semantic_event::Direction;
//!
//! let mut keys = KeyMap::default();
//! keys.bind(KeyCode::Char('l'), KeyAction::Navigate(Direction::Rightward));
//!
//! let action = keys.resolve(&KeyEvent::new(KeyCode::Char('l')));
//! assert_eq!(action, Some(KeyAction::Navigate(Direction::Rightward)));
//! assert_eq!(keys.resolve(&KeyEvent::new(KeyCode::Escape)), Some(KeyAction::Close));
//! ```

use ahash::AHashMap;

use crate::event::{KeyCode, KeyEvent};
use crate::semantic_event::Direction;

/// What a recognized key does while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Close the overlay.
    Close,
    /// Move through the gallery (ignored outside gallery mode).
    Navigate(Direction),
    /// Keep focus inside the overlay.
    TrapFocus,
    /// Keep the page underneath from scrolling.
    BlockScroll,
}

/// Mutable key map.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: AHashMap<KeyCode, KeyAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut bindings = AHashMap::with_capacity(8);
        bindings.insert(KeyCode::Escape, KeyAction::Close);
        bindings.insert(KeyCode::Tab, KeyAction::TrapFocus);
        bindings.insert(KeyCode::BackTab, KeyAction::TrapFocus);
        bindings.insert(KeyCode::Up, KeyAction::BlockScroll);
        bindings.insert(KeyCode::Down, KeyAction::BlockScroll);
        bindings.insert(KeyCode::Left, KeyAction::Navigate(Direction::Leftward));
        bindings.insert(KeyCode::Right, KeyAction::Navigate(Direction::Rightward));
        Self { bindings }
    }
}

impl KeyMap {
    /// A key map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: AHashMap::new(),
        }
    }

    /// Bind `code` to `action`, returning the previous binding.
    pub fn bind(&mut self, code: KeyCode, action: KeyAction) -> Option<KeyAction> {
        self.bindings.insert(code, action)
    }

    /// Remove the binding for `code`.
    pub fn unbind(&mut self, code: KeyCode) -> Option<KeyAction> {
        self.bindings.remove(&code)
    }

    /// Action bound to `code`, if any.
    #[must_use]
    pub fn get(&self, code: KeyCode) -> Option<KeyAction> {
        self.bindings.get(&code).copied()
    }

    /// Resolve a key event. Releases never resolve.
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if !key.is_actionable() {
            return None;
        }
        self.get(key.code)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the map has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEventKind, Modifiers};

    #[test]
    fn default_bindings() {
        let keys = KeyMap::default();
        assert_eq!(keys.get(KeyCode::Escape), Some(KeyAction::Close));
        assert_eq!(keys.get(KeyCode::Tab), Some(KeyAction::TrapFocus));
        assert_eq!(keys.get(KeyCode::BackTab), Some(KeyAction::TrapFocus));
        assert_eq!(keys.get(KeyCode::Up), Some(KeyAction::BlockScroll));
        assert_eq!(keys.get(KeyCode::Down), Some(KeyAction::BlockScroll));
        assert_eq!(
            keys.get(KeyCode::Left),
            Some(KeyAction::Navigate(Direction::Leftward))
        );
        assert_eq!(
            keys.get(KeyCode::Right),
            Some(KeyAction::Navigate(Direction::Rightward))
        );
        assert_eq!(keys.get(KeyCode::Enter), None);
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn release_never_resolves() {
        let keys = KeyMap::default();
        let release = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert_eq!(keys.resolve(&release), None);
    }

    #[test]
    fn repeat_resolves() {
        let keys = KeyMap::default();
        let repeat = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Repeat);
        assert_eq!(
            keys.resolve(&repeat),
            Some(KeyAction::Navigate(Direction::Rightward))
        );
    }

    #[test]
    fn modifiers_do_not_change_resolution() {
        let keys = KeyMap::default();
        let shift_tab = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert_eq!(keys.resolve(&shift_tab), Some(KeyAction::TrapFocus));
    }

    #[test]
    fn rebinding_replaces_previous() {
        let mut keys = KeyMap::default();
        let prev = keys.bind(KeyCode::Escape, KeyAction::BlockScroll);
        assert_eq!(prev, Some(KeyAction::Close));
        assert_eq!(keys.get(KeyCode::Escape), Some(KeyAction::BlockScroll));
    }

    #[test]
    fn unbind_and_empty() {
        let mut keys = KeyMap::empty();
        assert!(keys.is_empty());
        keys.bind(KeyCode::Char('q'), KeyAction::Close);
        assert_eq!(keys.unbind(KeyCode::Char('q')), Some(KeyAction::Close));
        assert!(keys.is_empty());
    }
}
