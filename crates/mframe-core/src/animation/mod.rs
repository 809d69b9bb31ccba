#![forbid(unsafe_code)]

//! Transition styling and timing.
//!
//! The overlay never animates anything itself: it tags panels with roles
//! and directions and the presentation layer plays declarative transitions.
//! This module holds the shared vocabulary for those transitions:
//!
//! - [`TransitionStyle`]: named parameters (slide duration, panel offset,
//!   scale, rotation, tilt, easing) a presenter maps onto its own engine,
//!   e.g. CSS custom properties via [`TransitionStyle::css_properties`].
//! - [`Easing`]: timing curves with both a numeric form and a CSS form.
//! - [`TransitionStyle::pose`]: sampled transforms for hosts that draw
//!   frames themselves (terminals, canvases).
//! - [`TransitionClock`]: completion signals for hosts without a native
//!   transition-end event.
//!
//! # Invariants
//!
//! - Easing output is clamped to `[0.0, 1.0]` for inputs in `[0.0, 1.0]`.
//! - `pose(Enter, _, 1.0)` and `pose(Exit, _, 0.0)` are the identity pose.

use std::time::Duration;

use crate::semantic_event::Direction;

pub mod presets;
mod timeline;

pub use timeline::TransitionClock;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Timing curve for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration.
    EaseIn,
    /// Quadratic deceleration.
    #[default]
    EaseOut,
    /// Quadratic acceleration then deceleration.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    /// CSS `transition-timing-function` keyword.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Parse a CSS timing keyword.
    #[must_use]
    pub fn from_css(name: &str) -> Option<Self> {
        match name.trim() {
            "linear" => Some(Self::Linear),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TransitionStyle
// ---------------------------------------------------------------------------

/// Which half of a panel hand-off a transform describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// The incoming panel moving into place.
    Enter,
    /// The outgoing panel moving away.
    Exit,
}

/// Sampled transform of a panel during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Horizontal offset as a fraction of the viewport width.
    pub offset: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Rotation around the vertical axis, in degrees.
    pub rotation: f32,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
}

impl Pose {
    /// The settled, centered pose.
    pub const IDENTITY: Self = Self {
        offset: 0.0,
        scale: 1.0,
        rotation: 0.0,
        opacity: 1.0,
    };
}

/// Named transition parameters handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStyle {
    /// Duration of the panel slide (default: 300ms).
    pub slide_duration: Duration,
    /// Duration of the overlay fade in/out (default: 200ms).
    pub fade_duration: Duration,
    /// Distance a staged panel sits from center, as a fraction of the
    /// viewport width (default: 1.0).
    pub panel_offset: f32,
    /// Scale of a staged panel (default: 1.0).
    pub scale: f32,
    /// Rotation of a staged panel in degrees (default: 0.0).
    pub rotation: f32,
    /// Perspective tilt of a staged panel in degrees (default: 0.0).
    pub tilt: f32,
    /// Timing curve (default: ease-out).
    pub easing: Easing,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            slide_duration: Duration::from_millis(300),
            fade_duration: Duration::from_millis(200),
            panel_offset: 1.0,
            scale: 1.0,
            rotation: 0.0,
            tilt: 0.0,
            easing: Easing::EaseOut,
        }
    }
}

impl TransitionStyle {
    /// Set the slide duration.
    #[must_use]
    pub fn slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    /// Set the overlay fade duration.
    #[must_use]
    pub fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Set the staged panel offset.
    #[must_use]
    pub fn panel_offset(mut self, offset: f32) -> Self {
        self.panel_offset = offset;
        self
    }

    /// Set the staged panel scale.
    #[must_use]
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the staged panel rotation.
    #[must_use]
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the staged panel tilt.
    #[must_use]
    pub fn tilt(mut self, degrees: f32) -> Self {
        self.tilt = degrees;
        self
    }

    /// Set the timing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Whether transitions complete instantly.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.slide_duration.is_zero()
    }

    /// Sample the transform of a panel at linear progress `t`.
    ///
    /// An entering panel starts staged on the side it comes from and ends
    /// centered. An exiting panel starts centered and ends staged on the
    /// opposite side. A `Rightward` move stages the incoming panel on the
    /// right.
    #[must_use]
    pub fn pose(&self, motion: Motion, direction: Direction, t: f64) -> Pose {
        let eased = self.easing.apply(t) as f32;
        // 0.0 = staged, 1.0 = centered.
        let (presence, side) = match motion {
            Motion::Enter => (eased, direction.offset() as f32),
            Motion::Exit => (1.0 - eased, -(direction.offset() as f32)),
        };
        let away = 1.0 - presence;
        Pose {
            offset: side * self.panel_offset * away,
            scale: 1.0 + (self.scale - 1.0) * away,
            rotation: side * self.rotation * away,
            opacity: presence,
        }
    }

    /// Named parameters as CSS custom properties.
    #[must_use]
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "--mf-slide-duration",
                format!("{}ms", self.slide_duration.as_millis()),
            ),
            (
                "--mf-fade-duration",
                format!("{}ms", self.fade_duration.as_millis()),
            ),
            (
                "--mf-panel-offset",
                format!("{}%", self.panel_offset * 100.0),
            ),
            ("--mf-scale", format!("{}", self.scale)),
            ("--mf-rotation", format!("{}deg", self.rotation)),
            ("--mf-tilt", format!("{}deg", self.tilt)),
            ("--mf-easing", self.easing.css().to_string()),
        ]
    }
}
