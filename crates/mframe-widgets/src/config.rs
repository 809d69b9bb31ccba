#![forbid(unsafe_code)]

//! Policy-as-data configuration for the overlay.
//!
//! [`MicroframeConfig`] captures every tunable of the overlay in one struct
//! that can be loaded from TOML or JSON (with the `config` feature) and
//! turned into an [`OverlayConfig`].
//!
//! # Loading
//!
//! ```toml
//! # microframe.toml
//! [transition]
//! preset = "deck"
//! slide_ms = 350
//!
//! [hint]
//! duration_ms = 3000
//!
//! [behavior]
//! modality = "touch"
//! close_on_content_click = false
//!
//! [[behavior.bindings]]
//! key = "l"
//! action = "next"
//! ```
//!
//! ```rust,ignore
//! let config = MicroframeConfig::from_toml_file("microframe.toml")?;
//! let overlay = config.to_overlay_config()?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in behavior, so
//! `MicroframeConfig::default().to_overlay_config()` equals
//! `OverlayConfig::default()`.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use mframe_core::animation::{Easing, TransitionStyle, presets};
use mframe_core::event::KeyCode;
use mframe_core::gesture::{DEFAULT_SWIPE_MIN_DISTANCE, SwipeConfig};
use mframe_core::keybinding::{KeyAction, KeyMap};
use mframe_core::semantic_event::Direction;

use crate::chrome::{DEFAULT_HINT_DURATION, HintConfig, InputModality, KEYBOARD_HINT, TOUCH_HINT};
use crate::overlay::OverlayConfig;

/// Longest accepted transition or fade duration.
const MAX_DURATION_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Top-level MicroframeConfig
// ---------------------------------------------------------------------------

/// Top-level overlay configuration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MicroframeConfig {
    /// Panel transition styling.
    pub transition: TransitionPolicyConfig,
    /// Swipe recognition.
    pub swipe: SwipePolicyConfig,
    /// Navigation hint.
    pub hint: HintPolicyConfig,
    /// Close behavior, input modality, and key bindings.
    pub behavior: BehaviorPolicyConfig,
}

impl MicroframeConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSer)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let t = &self.transition;
        if presets::by_name(&t.preset).is_none() {
            errors.push(format!(
                "transition.preset must be one of slide, deck, tilt, instant, got {:?}",
                t.preset
            ));
        }
        for (name, value) in [("slide_ms", t.slide_ms), ("fade_ms", t.fade_ms)] {
            if let Some(ms) = value
                && ms > MAX_DURATION_MS
            {
                errors.push(format!(
                    "transition.{name} must be <= {MAX_DURATION_MS}, got {ms}"
                ));
            }
        }
        if let Some(offset) = t.panel_offset
            && !(offset.is_finite() && offset >= 0.0)
        {
            errors.push(format!("transition.panel_offset must be >= 0, got {offset}"));
        }
        if let Some(scale) = t.scale
            && !(scale.is_finite() && scale > 0.0)
        {
            errors.push(format!("transition.scale must be > 0, got {scale}"));
        }
        for (name, value) in [("rotation", t.rotation), ("tilt", t.tilt)] {
            if let Some(degrees) = value
                && !degrees.is_finite()
            {
                errors.push(format!("transition.{name} must be finite, got {degrees}"));
            }
        }
        if let Some(easing) = &t.easing
            && Easing::from_css(easing).is_none()
        {
            errors.push(format!(
                "transition.easing must be a CSS timing keyword, got {easing:?}"
            ));
        }

        let min = self.swipe.min_distance;
        if !(min.is_finite() && min >= 0.0) {
            errors.push(format!("swipe.min_distance must be >= 0, got {min}"));
        }

        if self.hint.enabled {
            if self.hint.duration_ms == 0 {
                errors.push("hint.duration_ms must be > 0".into());
            }
            if self.hint.keyboard_text.trim().is_empty() {
                errors.push("hint.keyboard_text must not be empty".into());
            }
            if self.hint.touch_text.trim().is_empty() {
                errors.push("hint.touch_text must not be empty".into());
            }
        }

        if parse_modality(&self.behavior.modality).is_none() {
            errors.push(format!(
                "behavior.modality must be pointer or touch, got {:?}",
                self.behavior.modality
            ));
        }
        for key in &self.behavior.unbind {
            if KeyCode::from_key_name(key).is_none() {
                errors.push(format!("behavior.unbind: unknown key {key:?}"));
            }
        }
        for binding in &self.behavior.bindings {
            if KeyCode::from_key_name(&binding.key).is_none() {
                errors.push(format!("behavior.bindings: unknown key {:?}", binding.key));
            }
            if parse_action(&binding.action).is_none() {
                errors.push(format!(
                    "behavior.bindings: unknown action {:?}",
                    binding.action
                ));
            }
        }

        errors
    }

    /// Build a [`TransitionStyle`]: the preset with any overrides applied.
    ///
    /// Unknown presets and easings fall back to the defaults; call
    /// [`validate`](Self::validate) to catch them.
    #[must_use]
    pub fn to_transition_style(&self) -> TransitionStyle {
        let t = &self.transition;
        let mut style = presets::by_name(&t.preset).unwrap_or_default();
        if let Some(ms) = t.slide_ms {
            style.slide_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = t.fade_ms {
            style.fade_duration = Duration::from_millis(ms);
        }
        if let Some(offset) = t.panel_offset {
            style.panel_offset = offset;
        }
        if let Some(scale) = t.scale {
            style.scale = scale;
        }
        if let Some(rotation) = t.rotation {
            style.rotation = rotation;
        }
        if let Some(tilt) = t.tilt {
            style.tilt = tilt;
        }
        if let Some(easing) = t.easing.as_deref().and_then(Easing::from_css) {
            style.easing = easing;
        }
        style
    }

    /// Build a [`SwipeConfig`].
    #[must_use]
    pub fn to_swipe_config(&self) -> SwipeConfig {
        SwipeConfig::default().min_distance(self.swipe.min_distance)
    }

    /// Build a [`HintConfig`].
    #[must_use]
    pub fn to_hint_config(&self) -> HintConfig {
        HintConfig::new()
            .duration(Duration::from_millis(self.hint.duration_ms))
            .keyboard_text(self.hint.keyboard_text.clone())
            .touch_text(self.hint.touch_text.clone())
            .enabled(self.hint.enabled)
    }

    /// Build the key map: defaults, minus `unbind`, plus `bindings`.
    ///
    /// Entries that do not parse are skipped.
    #[must_use]
    pub fn to_key_map(&self) -> KeyMap {
        let mut keys = KeyMap::default();
        for code in self.behavior.unbind.iter().filter_map(|k| KeyCode::from_key_name(k)) {
            keys.unbind(code);
        }
        for binding in &self.behavior.bindings {
            if let (Some(code), Some(action)) = (
                KeyCode::from_key_name(&binding.key),
                parse_action(&binding.action),
            ) {
                keys.bind(code, action);
            }
        }
        keys
    }

    /// Validate and build the full [`OverlayConfig`].
    pub fn to_overlay_config(&self) -> Result<OverlayConfig, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        Ok(OverlayConfig::default()
            .transition(self.to_transition_style())
            .swipe(self.to_swipe_config())
            .hint(self.to_hint_config())
            .keys(self.to_key_map())
            .close_on_content_click(self.behavior.close_on_content_click)
            .modality(parse_modality(&self.behavior.modality).unwrap_or_default()))
    }
}

fn parse_modality(name: &str) -> Option<InputModality> {
    match name {
        "pointer" => Some(InputModality::Pointer),
        "touch" => Some(InputModality::Touch),
        _ => None,
    }
}

fn parse_action(name: &str) -> Option<KeyAction> {
    match name {
        "close" => Some(KeyAction::Close),
        "next" => Some(KeyAction::Navigate(Direction::Rightward)),
        "previous" => Some(KeyAction::Navigate(Direction::Leftward)),
        "trap-focus" => Some(KeyAction::TrapFocus),
        "block-scroll" => Some(KeyAction::BlockScroll),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Transition styling: a named preset plus optional overrides.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TransitionPolicyConfig {
    /// Preset name: `slide`, `deck`, `tilt`, or `instant`.
    pub preset: String,
    /// Slide duration override in milliseconds.
    pub slide_ms: Option<u64>,
    /// Overlay fade duration override in milliseconds.
    pub fade_ms: Option<u64>,
    /// Staged panel offset override (fraction of viewport width).
    pub panel_offset: Option<f32>,
    /// Staged panel scale override.
    pub scale: Option<f32>,
    /// Staged panel rotation override in degrees.
    pub rotation: Option<f32>,
    /// Staged panel tilt override in degrees.
    pub tilt: Option<f32>,
    /// Easing override as a CSS timing keyword.
    pub easing: Option<String>,
}

impl Default for TransitionPolicyConfig {
    fn default() -> Self {
        Self {
            preset: "slide".into(),
            slide_ms: None,
            fade_ms: None,
            panel_offset: None,
            scale: None,
            rotation: None,
            tilt: None,
            easing: None,
        }
    }
}

/// Swipe recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SwipePolicyConfig {
    /// Minimum horizontal travel in pixels.
    pub min_distance: f32,
}

impl Default for SwipePolicyConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
        }
    }
}

/// Navigation hint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HintPolicyConfig {
    /// Whether the hint is shown.
    pub enabled: bool,
    /// Display time in milliseconds.
    pub duration_ms: u64,
    /// Text for pointer and keyboard users.
    pub keyboard_text: String,
    /// Text for touch users.
    pub touch_text: String,
}

impl Default for HintPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_HINT_DURATION.as_millis() as u64,
            keyboard_text: KEYBOARD_HINT.into(),
            touch_text: TOUCH_HINT.into(),
        }
    }
}

/// One extra key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct KeyBindingConfig {
    /// DOM key name, e.g. `ArrowLeft` or `l`.
    pub key: String,
    /// One of `close`, `next`, `previous`, `trap-focus`, `block-scroll`.
    pub action: String,
}

/// Close behavior, input modality, and key bindings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BehaviorPolicyConfig {
    /// Whether content clicks close the overlay.
    pub close_on_content_click: bool,
    /// `pointer` or `touch`.
    pub modality: String,
    /// Default bindings to remove.
    pub unbind: Vec<String>,
    /// Bindings to add on top of the defaults.
    pub bindings: Vec<KeyBindingConfig>,
}

impl Default for BehaviorPolicyConfig {
    fn default() -> Self {
        Self {
            close_on_content_click: true,
            modality: "pointer".into(),
            unbind: Vec::new(),
            bindings: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
