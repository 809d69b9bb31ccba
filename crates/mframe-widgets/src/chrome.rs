#![forbid(unsafe_code)]

//! Gallery chrome: the position counter and the transient navigation hint.
//!
//! Both are plain state holders. The overlay pushes their text to the
//! presenter whenever they change.
//!
//! The hint is shown once per session, right after the overlay fades in. It
//! goes away on the first accepted navigation or when its display time runs
//! out, whichever comes first, and never comes back within that session.

use std::time::Duration;

use web_time::Instant;

use crate::navigator::Position;

/// Hint text for pointer and keyboard users.
pub const KEYBOARD_HINT: &str = "Use ← / → to navigate";
/// Hint text for touch users.
pub const TOUCH_HINT: &str = "Swipe left/right to navigate";
/// How long the hint stays up by default.
pub const DEFAULT_HINT_DURATION: Duration = Duration::from_secs(5);

/// How the user is most likely interacting with the page.
///
/// Hosts detect this (e.g. a coarse-pointer media query); it only affects
/// which hint text is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputModality {
    /// Mouse and keyboard.
    #[default]
    Pointer,
    /// Touch screen.
    Touch,
}

/// Configuration for the navigation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintConfig {
    /// How long the hint stays visible (default: 5s).
    pub duration: Duration,
    /// Text for [`InputModality::Pointer`].
    pub keyboard_text: String,
    /// Text for [`InputModality::Touch`].
    pub touch_text: String,
    /// Whether the hint is shown at all (default: true).
    pub enabled: bool,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_HINT_DURATION,
            keyboard_text: KEYBOARD_HINT.to_owned(),
            touch_text: TOUCH_HINT.to_owned(),
            enabled: true,
        }
    }
}

impl HintConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display time.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the pointer/keyboard text.
    #[must_use]
    pub fn keyboard_text(mut self, text: impl Into<String>) -> Self {
        self.keyboard_text = text.into();
        self
    }

    /// Set the touch text.
    #[must_use]
    pub fn touch_text(mut self, text: impl Into<String>) -> Self {
        self.touch_text = text.into();
        self
    }

    /// Enable or disable the hint.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Text to show for `modality`.
    pub fn text_for(&self, modality: InputModality) -> &str {
        match modality {
            InputModality::Pointer => &self.keyboard_text,
            InputModality::Touch => &self.touch_text,
        }
    }
}

/// Lifecycle of the hint within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintPhase {
    /// Mounted, not yet faded in.
    Pending,
    /// Visible since the given instant.
    Visible(Instant),
    /// Hidden for the rest of the session.
    Done,
}

/// Transient navigation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavHint {
    text: String,
    duration: Duration,
    phase: HintPhase,
}

impl NavHint {
    /// A hidden hint with the text for `modality`.
    #[must_use]
    pub fn new(config: &HintConfig, modality: InputModality) -> Self {
        Self {
            text: config.text_for(modality).to_owned(),
            duration: config.duration,
            phase: HintPhase::Pending,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, HintPhase::Visible(_))
    }

    /// Make the hint visible. Only the first call in a session has any
    /// effect; returns whether the hint became visible.
    pub fn show(&mut self, now: Instant) -> bool {
        if self.phase != HintPhase::Pending {
            return false;
        }
        self.phase = HintPhase::Visible(now);
        true
    }

    /// Hide the hint for good. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        let was_visible = self.is_visible();
        self.phase = HintPhase::Done;
        was_visible
    }

    /// When the hint will hide on its own.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            HintPhase::Visible(since) => Some(since + self.duration),
            HintPhase::Pending | HintPhase::Done => None,
        }
    }

    /// Hide the hint once its display time has elapsed. Returns whether it
    /// was hidden by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.hide(),
            _ => false,
        }
    }
}

/// Position counter, e.g. `3/5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    text: String,
}

impl Counter {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            text: position.to_string(),
        }
    }

    /// Update from `position`. Returns whether the text changed.
    pub fn update(&mut self, position: Position) -> bool {
        let text = position.to_string();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
