use std::sync::Arc;

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::descriptor::PropertyDescriptor;

/// How the monitoring system should treat a sample's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// Monotonically increasing (elapsed session time).
    Counter,
    /// Free to rise and fall (signal quality readings).
    Gauge,
}

/// One typed, fully labeled observation.
///
/// Created through [`PropertyDescriptor::sample`], which guarantees the label
/// values line up with the descriptor's label names.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    descriptor: Arc<PropertyDescriptor>,
    kind: ValueKind,
    value: f64,
    label_values: Vec<String>,
}

impl MetricSample {
    pub(crate) fn new(
        descriptor: Arc<PropertyDescriptor>,
        kind: ValueKind,
        value: f64,
        label_values: Vec<String>,
    ) -> Self {
        Self {
            descriptor,
            kind,
            value,
            label_values,
        }
    }

    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        &self.descriptor
    }

    pub fn metric_name(&self) -> &str {
        self.descriptor.metric_name()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Label values in the descriptor's declared order.
    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// `(name, value)` pairs in declared order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.descriptor
            .label_names()
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}
