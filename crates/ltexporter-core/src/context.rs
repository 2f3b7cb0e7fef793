// ── Scrape context ──
//
// Everything one scrape of one device needs, borrowed from the caller for
// the duration of the call. Nothing here is owned or kept afterwards.

use ltexporter_api::Session;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, Outcome};
use crate::sink::MetricSink;

/// Identity of a monitored device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub address: String,
}

impl Device {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Per-scrape borrowed state: output sink, device identity, live session and
/// diagnostics receiver.
#[derive(Clone, Copy)]
pub struct ScrapeContext<'a> {
    pub sink: &'a MetricSink,
    pub device: &'a Device,
    pub session: &'a dyn Session,
    pub diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> ScrapeContext<'a> {
    pub fn new(
        sink: &'a MetricSink,
        device: &'a Device,
        session: &'a dyn Session,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            sink,
            device,
            session,
            diagnostics,
        }
    }

    /// Report a diagnostic for this context's device.
    pub(crate) fn report(
        &self,
        interface: Option<&str>,
        property: Option<&str>,
        outcome: Outcome<'_>,
    ) {
        self.diagnostics.record(&DiagnosticEvent {
            device: &self.device.name,
            interface,
            property,
            outcome,
        });
    }
}

impl std::fmt::Debug for ScrapeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeContext")
            .field("device", self.device)
            .finish_non_exhaustive()
    }
}
