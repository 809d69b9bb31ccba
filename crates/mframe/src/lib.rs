#![forbid(unsafe_code)]

//! Microframe public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use mframe::prelude::*;
//!
//! let mut overlay = Microframe::new(HeadlessPresenter::new());
//! let members = (0..3).map(|i| MediaNode::image(i, format!("{i}.jpg"))).collect();
//! assert!(overlay.open(OpenRequest::Gallery { members, start: 0 }, Instant::now()));
//!
//! let outcome = overlay.handle_event(&Event::Key(KeyEvent::new(KeyCode::Right)), Instant::now());
//! assert!(outcome.prevent_default);
//! assert_eq!(overlay.position().map(|p| p.to_string()).as_deref(), Some("2/3"));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mframe_core::animation::{Easing, TransitionClock, TransitionStyle, presets};
pub use mframe_core::event::{
    ClickEvent, ClickTarget, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, TouchEvent,
    TouchEventKind,
};
pub use mframe_core::gesture::{SwipeConfig, SwipeRecognizer};
pub use mframe_core::keybinding::{KeyAction, KeyMap};
pub use mframe_core::semantic_event::Direction;

// --- Widget re-exports -----------------------------------------------------

pub use mframe_widgets::chrome::{HintConfig, InputModality};
pub use mframe_widgets::config::MicroframeConfig;
pub use mframe_widgets::media::{MediaItem, MediaNode, NodeId, Playback};
pub use mframe_widgets::navigator::{Advance, Position};
pub use mframe_widgets::overlay::{Effect, EventOutcome, Microframe, OverlayConfig};
pub use mframe_widgets::panel::{Panel, PanelId, PanelRole};
pub use mframe_widgets::presenter::{HeadlessPresenter, Listeners, Presenter};
pub use mframe_widgets::router::{OpenRequest, route_click};
pub use mframe_widgets::transition::TransitionToken;

pub use web_time::Instant;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Microframe hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside configuration loading.
    Io(std::io::Error),
    /// Configuration could not be loaded or is invalid.
    Config(mframe_widgets::ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<mframe_widgets::ConfigError> for Error {
    fn from(err: mframe_widgets::ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Microframe APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a configuration file by extension (`.json`, otherwise TOML) and
/// build the overlay configuration from it.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<OverlayConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        MicroframeConfig::from_json_file(path)?
    } else {
        MicroframeConfig::from_toml_file(path)?
    };
    Ok(config.to_overlay_config()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Advance, Direction, Effect, Error, Event, EventOutcome, HeadlessPresenter, Instant,
        KeyCode, KeyEvent, MediaNode, Microframe, OpenRequest, OverlayConfig, PanelRole,
        Presenter, Result, TouchEvent, TransitionToken,
    };

    pub use crate::{core, widgets};
}

pub use mframe_core as core;
pub use mframe_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: Error = mframe_widgets::ConfigError::Validation(vec!["x".into()]).into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "config: validation errors: x");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
