//! Describe command handler.

use std::sync::Arc;

use tabled::Tabled;

use ltexporter_config::Config;
use ltexporter_core::{PropertyDescriptor, Scraper};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DescriptorRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Property")]
    property: &'static str,
    #[tabled(rename = "Help")]
    help: &'static str,
    #[tabled(rename = "Labels")]
    labels: String,
}

impl From<&Arc<PropertyDescriptor>> for DescriptorRow {
    fn from(d: &Arc<PropertyDescriptor>) -> Self {
        Self {
            metric: d.metric_name().to_owned(),
            property: d.property(),
            help: d.help(),
            labels: d.label_names().join(","),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let descriptors = Scraper::new(config.collectors()).describe();
    let out = output::render_list(
        global.output,
        &descriptors,
        |d| DescriptorRow::from(d),
        |d| d.metric_name().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
