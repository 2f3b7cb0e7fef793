// ── Metric descriptors ──
//
// A descriptor is the static shape of one metric family: name, help text and
// the ordered label names every sample must carry. The registry is built
// once per collector and only ever read afterwards, so scrapes of different
// devices can share it without locking.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::sample::{MetricSample, ValueKind};

/// A monitored property and its help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub help: &'static str,
}

/// Static metadata for one metric family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    property: &'static str,
    metric_name: String,
    help: &'static str,
    label_names: &'static [&'static str],
}

impl PropertyDescriptor {
    /// Build the descriptor for `def` under `prefix`.
    ///
    /// The metric name is `{prefix}_{property}` with dashes turned into
    /// underscores, so `session-uptime` becomes `lte_interface_session_uptime`.
    pub fn new(prefix: &str, def: PropertyDef, label_names: &'static [&'static str]) -> Self {
        Self {
            property: def.name,
            metric_name: format!("{prefix}_{}", metric_name_fragment(def.name)),
            help: def.help,
            label_names,
        }
    }

    pub fn property(&self) -> &'static str {
        self.property
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        self.label_names
    }

    /// Create a sample of this metric.
    ///
    /// `label_values` must line up one-to-one with [`label_names`](Self::label_names);
    /// a partial label set is rejected rather than emitted.
    pub fn sample(
        self: &Arc<Self>,
        kind: ValueKind,
        value: f64,
        label_values: Vec<String>,
    ) -> Result<MetricSample, CoreError> {
        if label_values.len() != self.label_names.len() {
            return Err(CoreError::LabelCardinality {
                metric: self.metric_name.clone(),
                expected: self.label_names.len(),
                got: label_values.len(),
            });
        }
        Ok(MetricSample::new(Arc::clone(self), kind, value, label_values))
    }
}

fn metric_name_fragment(property: &str) -> String {
    property.replace('-', "_")
}

/// Immutable property → descriptor mapping, in registration order.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    descriptors: IndexMap<&'static str, Arc<PropertyDescriptor>>,
}

impl DescriptorRegistry {
    /// Build one descriptor per property, all sharing `label_names`.
    pub fn new(
        prefix: &str,
        properties: &[PropertyDef],
        label_names: &'static [&'static str],
    ) -> Self {
        let descriptors = properties
            .iter()
            .map(|def| {
                (
                    def.name,
                    Arc::new(PropertyDescriptor::new(prefix, *def, label_names)),
                )
            })
            .collect();
        Self { descriptors }
    }

    /// Every registered descriptor, for self-registration with a metrics system.
    pub fn describe(&self) -> impl Iterator<Item = &Arc<PropertyDescriptor>> {
        self.descriptors.values()
    }

    pub fn get(&self, property: &str) -> Option<&Arc<PropertyDescriptor>> {
        self.descriptors.get(property)
    }

    /// Like [`get`](Self::get), but a missing property is an error.
    pub fn lookup(&self, property: &str) -> Result<&Arc<PropertyDescriptor>, CoreError> {
        self.get(property).ok_or_else(|| CoreError::UnknownProperty {
            property: property.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
