// LTE interface collector
//
// Lists the device's LTE interfaces, takes a one-shot monitor snapshot of
// each, and turns the snapshot into labeled samples. Interfaces are handled
// one after another in listing order; the first failed device request ends
// the scrape.

mod emit;
mod fetch;

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::debug;

pub use emit::{LteLabels, MetricEmitter, reduce_band};
pub use fetch::{InterfaceEnumerator, SnapshotFetcher};

use super::Collector;
use crate::context::ScrapeContext;
use crate::descriptor::{DescriptorRegistry, PropertyDef, PropertyDescriptor};
use crate::error::CoreError;

/// Metric name prefix for every LTE descriptor.
pub const METRIC_PREFIX: &str = "lte_interface";

/// Label schema shared by every LTE metric, in emission order.
pub const LABEL_NAMES: &[&str] = &[
    "name",
    "address",
    "interface",
    "cellid",
    "primaryband",
    "caband",
];

pub const CURRENT_CELL_ID: &str = "current-cellid";
pub const PRIMARY_BAND: &str = "primary-band";
pub const CA_BAND: &str = "ca-band";
pub const SESSION_UPTIME: &str = "session-uptime";

/// Properties that only feed labels and never produce samples of their own.
pub const LABEL_SOURCES: &[&str] = &[CURRENT_CELL_ID, PRIMARY_BAND, CA_BAND];

/// Every property requested from the device, in request order.
pub const PROPERTIES: &[PropertyDef] = &[
    PropertyDef {
        name: CURRENT_CELL_ID,
        help: "Cell currently serving the interface",
    },
    PropertyDef {
        name: PRIMARY_BAND,
        help: "Primary LTE band",
    },
    PropertyDef {
        name: CA_BAND,
        help: "Carrier aggregation band",
    },
    PropertyDef {
        name: "rssi",
        help: "Received signal strength indicator in dBm",
    },
    PropertyDef {
        name: "rsrp",
        help: "Reference signal received power in dBm",
    },
    PropertyDef {
        name: "rsrq",
        help: "Reference signal received quality in dB",
    },
    PropertyDef {
        name: "sinr",
        help: "Signal to interference plus noise ratio in dB",
    },
    PropertyDef {
        name: "lac",
        help: "Location area code",
    },
    PropertyDef {
        name: "sector-id",
        help: "Sector identifier of the serving cell",
    },
    PropertyDef {
        name: "phy-cellid",
        help: "Physical cell identifier",
    },
    PropertyDef {
        name: "cqi",
        help: "Channel quality indicator",
    },
    PropertyDef {
        name: SESSION_UPTIME,
        help: "Seconds since the data session was established",
    },
];

/// Collector for `/interface/lte` telemetry.
#[derive(Debug, Clone)]
pub struct LteCollector {
    registry: DescriptorRegistry,
    enumerator: InterfaceEnumerator,
    fetcher: SnapshotFetcher,
}

impl LteCollector {
    pub fn new() -> Self {
        let properties: Vec<&'static str> = PROPERTIES.iter().map(|p| p.name).collect();
        Self {
            registry: DescriptorRegistry::new(METRIC_PREFIX, PROPERTIES, LABEL_NAMES),
            enumerator: InterfaceEnumerator,
            fetcher: SnapshotFetcher::new(properties),
        }
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &SnapshotFetcher {
        &self.fetcher
    }

    async fn collect_device(&self, ctx: &ScrapeContext<'_>) -> Result<(), CoreError> {
        let interfaces = self.enumerator.list(ctx).await?;
        let emitter = MetricEmitter::new(&self.registry, ctx);

        for interface in &interfaces {
            let Some(record) = self.fetcher.fetch(ctx, interface).await? else {
                continue;
            };
            let emitted = emitter.emit(interface, &record).await?;
            debug!(device = %ctx.device.name, interface = %interface, emitted, "collected interface");
        }

        Ok(())
    }
}

impl Default for LteCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for LteCollector {
    fn name(&self) -> &'static str {
        "lte"
    }

    fn describe(&self) -> Vec<Arc<PropertyDescriptor>> {
        self.registry.describe().cloned().collect()
    }

    fn collect<'a>(&'a self, ctx: &'a ScrapeContext<'a>) -> BoxFuture<'a, Result<(), CoreError>> {
        self.collect_device(ctx).boxed()
    }
}
