//! Scrape command handler.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tabled::Tabled;

use ltexporter_api::{ReplaySession, Session};
use ltexporter_config::{Config, config_path};
use ltexporter_core::{
    Device, DeviceReport, MetricSample, MetricSink, ScrapeTarget, Scraper, TracingDiagnostics,
    ValueKind, encode_text,
};

use crate::cli::{GlobalOpts, OutputFormat, ScrapeArgs};
use crate::error::CliError;
use crate::output;

// ── Sample view ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SampleView<'a> {
    metric: &'a str,
    kind: ValueKind,
    value: f64,
    labels: IndexMap<&'static str, &'a str>,
}

impl<'a> From<&'a MetricSample> for SampleView<'a> {
    fn from(s: &'a MetricSample) -> Self {
        Self {
            metric: s.metric_name(),
            kind: s.kind(),
            value: s.value(),
            labels: s.labels().collect(),
        }
    }
}

impl SampleView<'_> {
    fn label(&self, name: &str) -> &str {
        self.labels.get(name).copied().unwrap_or_default()
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Kind")]
    kind: ValueKind,
    #[tabled(rename = "Value")]
    value: f64,
    #[tabled(rename = "Cell")]
    cell: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "CA Band")]
    ca_band: String,
}

impl From<&SampleView<'_>> for SampleRow {
    fn from(s: &SampleView<'_>) -> Self {
        Self {
            device: s.label("name").to_owned(),
            interface: s.label("interface").to_owned(),
            metric: s.metric.to_owned(),
            kind: s.kind,
            value: s.value,
            cell: s.label("cellid").to_owned(),
            band: s.label("primaryband").to_owned(),
            ca_band: s.label("caband").to_owned(),
        }
    }
}

// ── Target selection ────────────────────────────────────────────────

fn select_devices(args: &ScrapeArgs, config: &Config) -> Result<Vec<Device>, CliError> {
    if let (Some(name), Some(address)) = (&args.name, &args.address) {
        return Ok(vec![Device::new(name.clone(), address.clone())]);
    }

    let configured = config.devices();
    if configured.is_empty() {
        return Err(CliError::NoDevices {
            path: config_path().display().to_string(),
        });
    }
    if args.device.is_empty() {
        return Ok(configured);
    }

    args.device
        .iter()
        .map(|wanted| {
            configured
                .iter()
                .find(|d| &d.name == wanted)
                .cloned()
                .ok_or_else(|| CliError::DeviceNotFound {
                    name: wanted.clone(),
                    available: configured
                        .iter()
                        .map(|d| d.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
        })
        .collect()
}

fn failure_summary(reports: &[DeviceReport]) -> Option<CliError> {
    let failed: Vec<&DeviceReport> = reports.iter().filter(|r| !r.is_success()).collect();
    if failed.is_empty() {
        return None;
    }
    let details = failed
        .iter()
        .map(|r| format!("{}: {}", r.device.name, r.errors().collect::<Vec<_>>().join("; ")))
        .collect::<Vec<_>>()
        .join("\n");
    Some(CliError::ScrapeFailed {
        failed: failed.len(),
        total: reports.len(),
        details,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &ScrapeArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = select_devices(args, config)?;
    let session: Arc<dyn Session> = Arc::new(
        ReplaySession::from_path(&args.replay).map_err(|source| CliError::Fixture { source })?,
    );
    let targets: Vec<ScrapeTarget> = devices
        .into_iter()
        .map(|device| ScrapeTarget::new(device, Arc::clone(&session)))
        .collect();

    let mut scraper = Scraper::new(config.collectors());
    if let Some(timeout) = config.scrape.timeout() {
        scraper = scraper.with_timeout(timeout);
    }

    let (sink, mut rx) = MetricSink::channel(config.scrape.sink_capacity);
    let produce = async {
        let reports = scraper.scrape_all(&targets, &sink, &TracingDiagnostics).await;
        drop(sink);
        reports
    };
    let consume = async {
        let mut samples = Vec::new();
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }
        samples
    };
    let (reports, mut samples) = tokio::join!(produce, consume);

    // Devices are scraped concurrently; keep output grouped in target order.
    samples.sort_by_key(|s| {
        targets
            .iter()
            .position(|t| s.label("name") == Some(t.device.name.as_str()))
            .unwrap_or(usize::MAX)
    });

    // Plain output is the Prometheus text format, headers included.
    let out = if global.output == OutputFormat::Plain {
        encode_text(&samples)?
    } else {
        let views: Vec<SampleView<'_>> = samples.iter().map(SampleView::from).collect();
        output::render_list(
            global.output,
            &views,
            |s| SampleRow::from(s),
            |s| s.metric.to_owned(),
        )?
    };
    output::print_output(out.trim_end(), global.quiet);

    match failure_summary(&reports) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
