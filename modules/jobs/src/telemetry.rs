//! Logging setup and the per-component logger handed to each layer.
//!
//! The process subscriber is installed once at startup by
//! [`init_logging`]. Components never reach for a global logger handle;
//! they receive a [`ComponentLogger`] at construction which stamps the
//! component name and the request id on every event.

use std::error::Error;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::context::RequestCtx;

/// Parse a configured level name, falling back to `INFO` for unknown values.
#[must_use]
pub fn parse_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// Level implied by `-v` flags (`-v` info, `-vv` debug, `-vvv` trace).
#[must_use]
pub fn verbosity_level(verbose: u8) -> Option<Level> {
    match verbose {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Effective level: the more verbose of the configured level and CLI flags.
#[must_use]
pub fn effective_level(configured: &str, verbose: u8) -> Level {
    let configured = parse_level(configured);
    verbosity_level(verbose).map_or(configured, |cli| cli.max(configured))
}

/// Install the JSON subscriber for the whole process.
///
/// `RUST_LOG`, when set and valid, wins over the configured level. A second
/// call is a no-op: the first subscriber stays installed.
pub fn init_logging(configured_level: &str, verbose: u8) {
    let level = effective_level(configured_level, verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let installed = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(filter)
        .try_init();

    match installed {
        Ok(()) => tracing::debug!(level = %level, "Logging initialized"),
        Err(e) => tracing::debug!(error = %e, "Logging already initialized; keeping existing subscriber"),
    }
}

/// Structured logger owned by one pipeline component.
#[derive(Debug, Clone, Copy)]
pub struct ComponentLogger {
    component: &'static str,
}

impl ComponentLogger {
    #[must_use]
    pub const fn new(component: &'static str) -> Self {
        Self { component }
    }

    #[must_use]
    pub const fn component(&self) -> &'static str {
        self.component
    }

    /// Operation is about to be delegated downstream.
    pub fn attempt(&self, ctx: &RequestCtx, message: &str) {
        tracing::info!(
            component = self.component,
            request_id = %ctx.request_id(),
            "{message}"
        );
    }

    /// Operation finished with `count` items.
    pub fn success(&self, ctx: &RequestCtx, message: &str, count: usize) {
        tracing::info!(
            component = self.component,
            request_id = %ctx.request_id(),
            count,
            "{message}"
        );
    }

    /// Operation failed; the error is recorded, never rewritten.
    pub fn failure(&self, ctx: &RequestCtx, message: &str, error: &(dyn Error + 'static)) {
        tracing::error!(
            component = self.component,
            request_id = %ctx.request_id(),
            error = %error,
            "{message}"
        );
    }
}
