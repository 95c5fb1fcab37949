//! # hubitat-exporter-adapter-prometheus
//!
//! Metrics sink backed by the [prometheus](https://docs.rs/prometheus) crate.
//!
//! ## Responsibilities
//! - Register one `GaugeVec` per [`Metric`](hubitat_exporter_domain::metric::Metric),
//!   labelled by `device`, in a registry owned by this adapter (no global state)
//! - Implement the [`MetricsSink`](hubitat_exporter_app::ports::MetricsSink) port
//! - Render the registry in the Prometheus text exposition format
//!
//! ## Dependency rule
//! Depends on `hubitat-exporter-app` (port traits) and `hubitat-exporter-domain` only.

pub mod error;
pub mod registry;

pub use error::MetricsError;
pub use registry::PrometheusMetrics;
