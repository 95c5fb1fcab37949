//! Weather source port — optional outdoor conditions exported next to the
//! hub devices.

use std::future::Future;

use hubitat_exporter_domain::error::FetchError;

/// Current outdoor conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent (`0..=100`).
    pub humidity: f64,
}

/// Fetches current outdoor conditions.
pub trait WeatherSource {
    /// Fetch the current conditions.
    fn current(&self) -> impl Future<Output = Result<Weather, FetchError>> + Send;
}

/// Placeholder source for deployments without weather; it cannot be
/// constructed, so it is never queried.
#[derive(Debug, Clone, Copy)]
pub enum NoWeather {}

impl WeatherSource for NoWeather {
    fn current(&self) -> impl Future<Output = Result<Weather, FetchError>> + Send {
        let never = *self;
        async move { match never {} }
    }
}
