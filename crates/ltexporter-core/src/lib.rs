//! LTE interface collection pipeline for `ltexporter`.
//!
//! One scrape of one device runs: list the LTE interfaces, take a one-shot
//! monitor snapshot of each, and turn each snapshot into typed, labeled
//! [`MetricSample`]s written to a caller-owned [`MetricSink`].
//!
//! - **[`DescriptorRegistry`]** — immutable property → descriptor mapping,
//!   built once when a collector is constructed.
//! - **[`Collector`]** — `describe` + `collect`, implemented by
//!   [`LteCollector`].
//! - **[`Scraper`]** — runs every collector against many devices.
//! - **[`DiagnosticSink`]** — receives per-step outcomes; the pipeline itself
//!   formats no log lines.
//! - **[`parse_duration`]** — compound duration strings to seconds.
//! - **[`encode_text`]** — collected samples in the Prometheus text format.

pub mod collector;
pub mod context;
pub mod descriptor;
pub mod diagnostics;
pub mod duration;
pub mod error;
pub mod exposition;
pub mod sample;
pub mod scrape;
pub mod sink;

pub use collector::{Collector, LteCollector};
pub use context::{Device, ScrapeContext};
pub use descriptor::{DescriptorRegistry, PropertyDef, PropertyDescriptor};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, Outcome, TracingDiagnostics};
pub use duration::parse_duration;
pub use error::{CoreError, Operation, ParseError};
pub use exposition::encode_text;
pub use sample::{MetricSample, ValueKind};
pub use scrape::{CollectorOutcome, DeviceReport, ScrapeTarget, Scraper};
pub use sink::MetricSink;
