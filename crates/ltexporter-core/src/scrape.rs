// ── Scraper ──
//
// Outer scheduler: runs every registered collector against each target
// device. Devices are scraped concurrently; collectors for one device run in
// order. The registry behind each collector is immutable, so concurrent
// device scrapes share it without locking.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use ltexporter_api::Session;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::collector::Collector;
use crate::context::{Device, ScrapeContext};
use crate::descriptor::PropertyDescriptor;
use crate::diagnostics::DiagnosticSink;
use crate::error::CoreError;
use crate::sink::MetricSink;

/// One device plus the session to reach it.
#[derive(Clone)]
pub struct ScrapeTarget {
    pub device: Device,
    pub session: Arc<dyn Session>,
}

impl ScrapeTarget {
    pub fn new(device: Device, session: Arc<dyn Session>) -> Self {
        Self { device, session }
    }
}

impl std::fmt::Debug for ScrapeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeTarget")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

/// Result of one collector on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectorOutcome {
    pub collector: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one device scrape. Samples themselves went to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device: Device,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub collectors: Vec<CollectorOutcome>,
    /// Set when the scrape as a whole did not finish (timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeviceReport {
    /// `true` when the scrape finished and no collector failed.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.collectors.iter().all(|c| c.error.is_none())
    }

    /// Every error message in this report, scrape-level first.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.error
            .as_deref()
            .into_iter()
            .chain(self.collectors.iter().filter_map(|c| c.error.as_deref()))
    }
}

/// Runs a fixed set of collectors against devices.
#[derive(Clone, Default)]
pub struct Scraper {
    collectors: Vec<Arc<dyn Collector>>,
    timeout: Option<Duration>,
}

impl Scraper {
    pub fn new(collectors: Vec<Arc<dyn Collector>>) -> Self {
        Self {
            collectors,
            timeout: None,
        }
    }

    /// Bound every device scrape. The collectors themselves never time out.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn collectors(&self) -> &[Arc<dyn Collector>] {
        &self.collectors
    }

    /// Every descriptor of every collector, in registration order.
    pub fn describe(&self) -> Vec<Arc<PropertyDescriptor>> {
        self.collectors.iter().flat_map(|c| c.describe()).collect()
    }

    /// Scrape one device with every collector, in order.
    ///
    /// A failing collector is logged and recorded; the next one still runs.
    pub async fn scrape_device(
        &self,
        target: &ScrapeTarget,
        sink: &MetricSink,
        diagnostics: &dyn DiagnosticSink,
    ) -> DeviceReport {
        let started_at = Utc::now();
        let clock = Instant::now();
        let ctx = ScrapeContext::new(sink, &target.device, target.session.as_ref(), diagnostics);
        let mut outcomes = Vec::with_capacity(self.collectors.len());

        let run = self.run_collectors(&ctx, &mut outcomes);
        let error = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run).await.err().map(|_| {
                let err = CoreError::Timeout {
                    device: target.device.name.clone(),
                    timeout_secs: limit.as_secs(),
                };
                warn!(device = %target.device.name, error = %err, "device scrape abandoned");
                err.to_string()
            }),
            None => {
                run.await;
                None
            }
        };

        let elapsed_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(device = %target.device.name, elapsed_ms, "device scrape finished");

        DeviceReport {
            device: target.device.clone(),
            started_at,
            elapsed_ms,
            collectors: outcomes,
            error,
        }
    }

    /// Scrape all targets concurrently into one sink. Reports come back in
    /// target order.
    pub async fn scrape_all(
        &self,
        targets: &[ScrapeTarget],
        sink: &MetricSink,
        diagnostics: &dyn DiagnosticSink,
    ) -> Vec<DeviceReport> {
        info!(devices = targets.len(), collectors = self.collectors.len(), "starting scrape");
        join_all(
            targets
                .iter()
                .map(|target| self.scrape_device(target, sink, diagnostics)),
        )
        .await
    }

    async fn run_collectors(&self, ctx: &ScrapeContext<'_>, outcomes: &mut Vec<CollectorOutcome>) {
        for collector in &self.collectors {
            let error = match collector.collect(ctx).await {
                Ok(()) => None,
                Err(e) => {
                    warn!(
                        device = %ctx.device.name,
                        collector = collector.name(),
                        error = %e,
                        "collector failed"
                    );
                    Some(e.to_string())
                }
            };
            outcomes.push(CollectorOutcome {
                collector: collector.name(),
                error,
            });
        }
    }
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.collectors.iter().map(|c| c.name()).collect();
        f.debug_struct("Scraper")
            .field("collectors", &names)
            .field("timeout", &self.timeout)
            .finish()
    }
}
