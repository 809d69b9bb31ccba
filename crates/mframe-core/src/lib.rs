#![forbid(unsafe_code)]

//! Core: input events, gesture recognition, key maps, and transition timing.
//!
//! # Role in Microframe
//! `mframe-core` is the input layer. It owns the normalized event types the
//! overlay consumes, swipe classification for touch input, the key map that
//! turns key presses into overlay actions, and the transition styling and
//! timing primitives shared with the presentation layer.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, touches, clicks, focus).
//! - **Gesture recognition**: touch-start/touch-end pairs into swipes.
//! - **Key map**: logical keys into overlay actions with default prevention.
//! - **Animation**: transition styles, easing, and a completion clock for
//!   hosts that have no native transition-end signal.
//!
//! # How it fits in the system
//! `mframe-widgets` consumes `mframe-core::Event` values and drives the
//! overlay state machine. Nothing in this crate knows about panels or
//! galleries, so hosts can reuse the input layer on its own.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod keybinding;
pub mod logging;
pub mod semantic_event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
