// ── Diagnostic events ──
//
// The collection pipeline never formats log lines itself. It reports what
// happened (device, interface, property, outcome) to a `DiagnosticSink`;
// `TracingDiagnostics` turns those reports into structured `tracing` events.

use strum::IntoStaticStr;
use tracing::{debug, error, warn};

use crate::error::ParseError;

/// What happened at one step of a scrape.
#[derive(Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome<'a> {
    /// About to list the device's LTE interfaces.
    ListingInterfaces,
    /// Interface listing succeeded.
    InterfacesListed { interfaces: &'a [String] },
    /// About to request a one-shot snapshot.
    FetchingSnapshot { proplist: &'a str },
    /// Snapshot reply arrived with this many records.
    SnapshotReceived { records: usize },
    /// Snapshot reply had no records; the interface is skipped.
    EmptySnapshot,
    /// A device request failed; the scrape is aborted.
    TransportFailed { error: &'a ltexporter_api::Error },
    /// A property value could not be converted; the property is skipped.
    ParseFailed {
        value: &'a str,
        error: &'a ParseError,
    },
}

impl Outcome<'_> {
    /// Stable snake_case name (`parse_failed`, `empty_snapshot`, ...).
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// One diagnostic report.
#[derive(Debug)]
pub struct DiagnosticEvent<'a> {
    pub device: &'a str,
    pub interface: Option<&'a str>,
    pub property: Option<&'a str>,
    pub outcome: Outcome<'a>,
}

/// Receiver of pipeline diagnostics, supplied by the caller.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent<'_>);
}

/// Forwards every event to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, event: &DiagnosticEvent<'_>) {
        let device = event.device;
        let interface = event.interface.unwrap_or_default();
        let property = event.property.unwrap_or_default();

        match &event.outcome {
            Outcome::ListingInterfaces => debug!(device, "fetching lte interface names"),
            Outcome::InterfacesListed { interfaces } => {
                debug!(device, ?interfaces, "fetched lte interface names");
            }
            Outcome::FetchingSnapshot { proplist } => {
                debug!(device, interface, proplist, "fetching interface snapshot");
            }
            Outcome::SnapshotReceived { records } => {
                debug!(device, interface, records, "received interface snapshot");
            }
            Outcome::EmptySnapshot => {
                debug!(device, interface, "empty snapshot reply, skipping interface");
            }
            Outcome::TransportFailed { error } => {
                let transient = error.is_transient();
                error!(device, interface, transient, %error, "device request failed");
            }
            Outcome::ParseFailed { value, error } => {
                warn!(device, interface, property, value, %error, "error parsing interface metric value");
            }
        }
    }
}
