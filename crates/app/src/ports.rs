//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod device_source;
pub mod metrics_sink;
pub mod weather_source;

pub use device_source::DeviceSource;
pub use metrics_sink::{MetricsExposition, MetricsSink};
pub use weather_source::{NoWeather, Weather, WeatherSource};
