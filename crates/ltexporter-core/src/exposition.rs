// ── Text exposition ──
//
// Collected samples are loaded into a throwaway `prometheus::Registry`, one
// metric family per descriptor, and rendered with the text encoder. The
// encoder owns the `# HELP`/`# TYPE` headers and label escaping.

use indexmap::IndexMap;
use indexmap::map::Entry;
use prometheus::{CounterVec, GaugeVec, Opts, Registry, TextEncoder};

use crate::descriptor::PropertyDescriptor;
use crate::error::CoreError;
use crate::sample::{MetricSample, ValueKind};

enum Family {
    Gauge(GaugeVec),
    Counter(CounterVec),
}

impl Family {
    fn register(
        registry: &Registry,
        descriptor: &PropertyDescriptor,
        kind: ValueKind,
    ) -> Result<Self, CoreError> {
        let opts = Opts::new(descriptor.metric_name(), descriptor.help());
        let family = match kind {
            ValueKind::Gauge => {
                let vec = GaugeVec::new(opts, descriptor.label_names())?;
                registry.register(Box::new(vec.clone()))?;
                Self::Gauge(vec)
            }
            ValueKind::Counter => {
                let vec = CounterVec::new(opts, descriptor.label_names())?;
                registry.register(Box::new(vec.clone()))?;
                Self::Counter(vec)
            }
        };
        Ok(family)
    }

    fn observe(&self, sample: &MetricSample) -> Result<(), CoreError> {
        let values: Vec<&str> = sample.label_values().iter().map(String::as_str).collect();
        match self {
            Self::Gauge(vec) => vec
                .get_metric_with_label_values(values.as_slice())?
                .set(sample.value()),
            Self::Counter(vec) => vec
                .get_metric_with_label_values(values.as_slice())?
                .inc_by(sample.value()),
        }
        Ok(())
    }
}

/// Render `samples` in the Prometheus text format.
///
/// Only metrics with at least one sample get a family. Families come out
/// sorted by metric name, as the registry gathers them.
pub fn encode_text(samples: &[MetricSample]) -> Result<String, CoreError> {
    let registry = Registry::new();
    let mut families: IndexMap<&str, Family> = IndexMap::new();

    for sample in samples {
        let family = match families.entry(sample.metric_name()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Family::register(
                &registry,
                sample.descriptor(),
                sample.kind(),
            )?),
        };
        family.observe(sample)?;
    }

    Ok(TextEncoder::new().encode_to_string(&registry.gather())?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collector::LteCollector;
    use crate::collector::lte::SESSION_UPTIME;

    fn sample(
        collector: &LteCollector,
        property: &str,
        kind: ValueKind,
        value: f64,
        device: &str,
    ) -> MetricSample {
        let labels = [device, "10.0.0.1", "lte1", "12345", "B3", ""]
            .map(str::to_owned)
            .to_vec();
        collector
            .registry()
            .lookup(property)
            .unwrap()
            .sample(kind, value, labels)
            .unwrap()
    }

    #[test]
    fn families_carry_help_and_type() {
        let collector = LteCollector::new();
        let samples = [
            sample(&collector, "rssi", ValueKind::Gauge, -70.0, "edge-1"),
            sample(&collector, SESSION_UPTIME, ValueKind::Counter, 3723.0, "edge-1"),
        ];
        let text = encode_text(&samples).unwrap();

        assert!(text.contains("# HELP lte_interface_rssi Received signal strength indicator in dBm\n"));
        assert!(text.contains("# TYPE lte_interface_rssi gauge\n"));
        assert!(text.contains("# TYPE lte_interface_session_uptime counter\n"));
        assert!(text.contains("} -70\n"));
        assert!(text.contains("} 3723\n"));
        assert!(text.contains("interface=\"lte1\""));
    }

    #[test]
    fn one_family_per_metric_across_devices() {
        let collector = LteCollector::new();
        let samples = [
            sample(&collector, "rssi", ValueKind::Gauge, -70.0, "edge-1"),
            sample(&collector, "rssi", ValueKind::Gauge, -81.0, "edge-2"),
        ];
        let text = encode_text(&samples).unwrap();

        assert_eq!(text.matches("# TYPE lte_interface_rssi gauge").count(), 1);
        assert!(text.contains("name=\"edge-1\""));
        assert!(text.contains("name=\"edge-2\""));
    }

    #[test]
    fn label_values_are_escaped() {
        let collector = LteCollector::new();
        let samples = [sample(&collector, "rssi", ValueKind::Gauge, -70.0, "e\"1")];
        let text = encode_text(&samples).unwrap();
        assert!(text.contains(r#"name="e\"1""#), "{text}");
    }

    #[test]
    fn no_samples_render_nothing() {
        assert_eq!(encode_text(&[]).unwrap(), "");
    }
}
