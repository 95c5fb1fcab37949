//! `OpenWeatherMap` configuration.

use serde::Deserialize;

/// Configuration for the weather source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// API key; the source is disabled when empty.
    pub api_key: String,
    /// `OpenWeatherMap` city id; the source is disabled when `0`.
    pub city_id: u32,
    /// API base URL.
    pub base_url: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// Whether both an API key and a city id are configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty() && self.city_id != 0
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            city_id: 0,
            base_url: "https://api.openweathermap.org".to_string(),
            timeout_secs: 10,
        }
    }
}
