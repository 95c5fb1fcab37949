//! Metrics sink port: labelled gauges with one `device` label, plus the
//! exposition side read by the scrape endpoint.

use hubitat_exporter_domain::metric::Metric;

/// Receives readings for exposition.
///
/// Implementations synchronise internally: several scrape cycles may set
/// values concurrently.
pub trait MetricsSink {
    /// Drop every labelled value of `metric`.
    fn reset(&self, metric: Metric);

    /// Set `metric{device=<device>}` to `value`.
    fn set(&self, metric: Metric, device: &str, value: f64);
}

/// Renders the current gauge values for a metrics collector.
pub trait MetricsExposition {
    /// Rendering failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// `Content-Type` of the rendered document.
    fn content_type(&self) -> &'static str;

    /// Render every gauge.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when encoding fails.
    fn render(&self) -> Result<String, Self::Error>;
}
