#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported so
//! downstream crates can log through `mframe_core::debug!` and friends
//! without naming `tracing` themselves. Without the feature this module is
//! empty and instrumentation compiles away.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], a one-call
//! setup for newline-delimited JSON logs filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Default filter directive when `RUST_LOG` is unset.
#[cfg(feature = "tracing-json")]
pub const DEFAULT_LOG_FILTER: &str = "mframe=info";

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Falls back to [`DEFAULT_LOG_FILTER`] when the variable is unset or
/// invalid. Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
