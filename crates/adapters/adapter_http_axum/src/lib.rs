//! # hubitat-exporter-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve `GET /metrics`: run one scrape cycle, then render the gauges for
//!   the metrics collector
//! - Serve `GET /health` for liveness probes
//! - Map scrape failures into `500` responses naming the cause
//!
//! ## Dependency rule
//! Depends on `hubitat-exporter-app` (for port traits and services) and
//! `hubitat-exporter-domain` (for error types). Never leaks axum types into
//! the domain.

pub mod error;
pub mod metrics;
pub mod router;
pub mod state;
