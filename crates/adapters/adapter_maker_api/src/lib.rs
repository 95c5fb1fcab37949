//! # hubitat-exporter-adapter-maker-api
//!
//! Driven adapter for the Hubitat **Maker API** built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Resolve the device-list endpoint (`/apps/api/{app_id}/devices/all`)
//!   against the configured hub URL, local or cloud
//! - Authenticate with the `access_token` query parameter
//! - Bound every request with the configured timeout
//! - Decode the JSON payload into domain [`Devices`](hubitat_exporter_domain::device::Devices)
//! - Implement the [`DeviceSource`](hubitat_exporter_app::ports::DeviceSource) port
//!
//! ## Dependency rule
//! Depends on `hubitat-exporter-app` (port traits) and `hubitat-exporter-domain` only.

pub mod client;
pub mod config;
pub mod error;

pub use client::MakerApiClient;
pub use config::MakerApiConfig;
pub use error::MakerApiError;
