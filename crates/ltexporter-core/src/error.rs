// ── Core error types ──
//
// `CoreError` is what a scrape returns to its caller. Only transport failures
// abort a scrape; per-property `ParseError`s are reported as diagnostics and
// never leave the emitter.

use strum::Display;
use thiserror::Error;

/// Which device request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[strum(serialize = "interface listing")]
    ListInterfaces,
    #[strum(serialize = "interface snapshot")]
    Snapshot,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("{operation} failed on device {device}: {source}")]
    Transport {
        device: String,
        operation: Operation,
        interface: Option<String>,
        #[source]
        source: ltexporter_api::Error,
    },

    #[error("Scrape of device {device} timed out after {timeout_secs}s")]
    Timeout { device: String, timeout_secs: u64 },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Metric sink closed by its consumer")]
    SinkClosed,

    #[error("Failed to encode metrics: {0}")]
    Exposition(#[from] prometheus::Error),

    // ── Descriptor contract ──────────────────────────────────────────
    #[error("Metric {metric} expects {expected} label values, got {got}")]
    LabelCardinality {
        metric: String,
        expected: usize,
        got: usize,
    },

    #[error("No descriptor registered for property {property}")]
    UnknownProperty { property: String },
}

impl CoreError {
    /// Returns `true` for failures raised by the device session.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Failure converting one raw property value into a number.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty value")]
    Empty,

    #[error("invalid duration {input:?}: {source}")]
    Duration {
        input: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid clock component in duration {input:?}")]
    Clock { input: String },

    #[error("invalid number {input:?}: {source}")]
    Number {
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("non-finite number {input:?}")]
    NonFinite { input: String },
}
