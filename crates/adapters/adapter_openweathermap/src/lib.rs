//! # hubitat-exporter-adapter-openweathermap
//!
//! Optional outdoor weather source backed by the
//! [OpenWeatherMap](https://openweathermap.org/current) current-weather API.
//!
//! ## Responsibilities
//! - Query current conditions for one city id, in metric units
//! - Implement the [`WeatherSource`](hubitat_exporter_app::ports::WeatherSource) port
//!
//! ## Dependency rule
//! Depends on `hubitat-exporter-app` (port traits) and `hubitat-exporter-domain` only.

pub mod client;
pub mod config;
pub mod error;

pub use client::OpenWeatherMapClient;
pub use config::WeatherConfig;
pub use error::WeatherError;
