#![forbid(unsafe_code)]

//! Gallery navigation, panel transitions, and the overlay lifecycle.
//!
//! # Role in Microframe
//! `mframe-widgets` is the state layer. It decides which panels exist, how
//! they are tagged, and when they are handed to the presentation layer
//! through the [`Presenter`](presenter::Presenter) trait. It never computes
//! pixel geometry.
//!
//! # Modules
//! - [`media`]: page nodes and captured gallery items.
//! - [`panel`]: panels and the panel factory.
//! - [`navigator`]: gallery position and legality of moves.
//! - [`transition`]: the single-incoming-panel transition engine.
//! - [`chrome`]: position counter and navigation hint.
//! - [`router`]: page click routing.
//! - [`overlay`]: the [`Microframe`](overlay::Microframe) controller.
//! - [`config`]: policy-as-data configuration.

pub mod chrome;
pub mod config;
pub mod media;
pub mod navigator;
pub mod overlay;
pub mod panel;
pub mod presenter;
pub mod router;
pub mod transition;

pub use config::{ConfigError, MicroframeConfig};
pub use overlay::{Effect, EventOutcome, Microframe, OverlayConfig};
pub use presenter::{HeadlessPresenter, Presenter};
