// Snapshot → samples
//
// Label-source properties feed the label set; every other property becomes
// at most one sample. Values that fail to parse never reach the sink.

use ltexporter_api::Record;

use super::{CA_BAND, CURRENT_CELL_ID, LABEL_SOURCES, PRIMARY_BAND, PROPERTIES, SESSION_UPTIME};
use crate::context::ScrapeContext;
use crate::descriptor::DescriptorRegistry;
use crate::diagnostics::Outcome;
use crate::duration::parse_duration;
use crate::error::{CoreError, ParseError};
use crate::sample::ValueKind;

/// First whitespace-delimited token of a band value.
///
/// Devices append frequency and width annotations (`"B3 10MHz"`); only the
/// band identifier is kept. An empty value stays empty.
pub fn reduce_band(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or_default()
}

/// Per-interface label values taken from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LteLabels<'r> {
    pub cell_id: &'r str,
    pub primary_band: &'r str,
    pub ca_band: &'r str,
}

impl<'r> LteLabels<'r> {
    pub fn from_record(record: &'r Record) -> Self {
        Self {
            cell_id: record.get_or(CURRENT_CELL_ID, ""),
            primary_band: reduce_band(record.get_or(PRIMARY_BAND, "")),
            ca_band: reduce_band(record.get_or(CA_BAND, "")),
        }
    }

    /// Label values in schema order: name, address, interface, cellid,
    /// primaryband, caband.
    pub fn values(&self, device_name: &str, device_address: &str, interface: &str) -> Vec<String> {
        [
            device_name,
            device_address,
            interface,
            self.cell_id,
            self.primary_band,
            self.ca_band,
        ]
        .into_iter()
        .map(str::to_owned)
        .collect()
    }
}

fn parse_gauge(raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: f64 = trimmed.parse().map_err(|source| ParseError::Number {
        input: trimmed.to_owned(),
        source,
    })?;
    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            input: trimmed.to_owned(),
        });
    }
    Ok(value)
}

fn parse_value(property: &str, raw: &str) -> Result<(ValueKind, f64), ParseError> {
    if property == SESSION_UPTIME {
        parse_duration(raw).map(|secs| (ValueKind::Counter, secs))
    } else {
        parse_gauge(raw).map(|v| (ValueKind::Gauge, v))
    }
}

/// Writes the samples of one interface snapshot to the context's sink.
#[derive(Debug, Clone, Copy)]
pub struct MetricEmitter<'a> {
    registry: &'a DescriptorRegistry,
    ctx: &'a ScrapeContext<'a>,
}

impl<'a> MetricEmitter<'a> {
    pub fn new(registry: &'a DescriptorRegistry, ctx: &'a ScrapeContext<'a>) -> Self {
        Self { registry, ctx }
    }

    /// Emit every parseable, non-empty property of `record`. Returns the
    /// number of samples written.
    pub async fn emit(&self, interface: &str, record: &Record) -> Result<usize, CoreError> {
        let device = self.ctx.device;
        let labels = LteLabels::from_record(record);
        let mut emitted = 0;

        for entry in PROPERTIES {
            let property = entry.name;
            if LABEL_SOURCES.contains(&property) {
                continue;
            }
            let Some(raw) = record.get(property) else {
                continue;
            };

            let (kind, value) = match parse_value(property, raw) {
                Ok(parsed) => parsed,
                Err(error) => {
                    self.ctx.report(
                        Some(interface),
                        Some(property),
                        Outcome::ParseFailed {
                            value: raw,
                            error: &error,
                        },
                    );
                    continue;
                }
            };

            let sample = self.registry.lookup(property)?.sample(
                kind,
                value,
                labels.values(&device.name, &device.address, interface),
            )?;
            self.ctx.sink.emit(sample).await?;
            emitted += 1;
        }

        Ok(emitted)
    }
}
