//! # hubitat-exporter-app
//!
//! Application layer — the scrape use-case and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceSource` — fetch every device from the hub
//!   - `MetricsSink` — reset and set labelled gauges
//!   - `WeatherSource` — optional outdoor conditions
//! - Define the **driving/inbound** use-case:
//!   - `ScrapeService` — one fetch → filter → read → emit cycle per request
//! - Isolate per-device extraction failures (log and skip)
//!
//! ## Dependency rule
//! Depends on `hubitat-exporter-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
