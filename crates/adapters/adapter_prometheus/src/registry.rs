//! Gauge registry implementing the metrics sink port.

use std::collections::HashMap;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use hubitat_exporter_app::ports::{MetricsExposition, MetricsSink};
use hubitat_exporter_domain::metric::{DEVICE_LABEL, Metric};

use crate::error::MetricsError;

/// Registry holding one device-labelled gauge per [`Metric`].
///
/// Lives for the whole process and is shared by concurrent scrapes; the
/// prometheus types synchronise label mutation internally.
pub struct PrometheusMetrics {
    registry: Registry,
    gauges: HashMap<Metric, GaugeVec>,
}

impl PrometheusMetrics {
    /// Create a registry with every gauge registered.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Prometheus`] if a gauge cannot be created or
    /// registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();
        let mut gauges = HashMap::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let gauge = GaugeVec::new(Opts::new(metric.name(), metric.help()), &[DEVICE_LABEL])?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(metric, gauge);
        }
        Ok(Self { registry, gauges })
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl MetricsSink for PrometheusMetrics {
    fn reset(&self, metric: Metric) {
        if let Some(gauge) = self.gauges.get(&metric) {
            gauge.reset();
        }
    }

    fn set(&self, metric: Metric, device: &str, value: f64) {
        if let Some(gauge) = self.gauges.get(&metric) {
            gauge.with_label_values(&[device]).set(value);
        }
    }
}

impl MetricsExposition for PrometheusMetrics {
    type Error = MetricsError;

    fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Render every registered gauge in the text exposition format.
    fn render(&self) -> Result<String, MetricsError> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
