//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hubitat-exporter.toml` in the working directory. Everything but
//! the hub location has a default, so the file is optional when the hub is
//! configured through the environment. Environment variables take precedence
//! over file values.

use serde::Deserialize;

use hubitat_exporter_adapter_maker_api::MakerApiConfig;
use hubitat_exporter_adapter_openweathermap::WeatherConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Maker API settings.
    pub hub: MakerApiConfig,
    /// Outdoor weather settings; disabled unless a key and city are set.
    pub weather: WeatherConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hubitat-exporter.toml` (if present), apply
    /// environment-variable overrides, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is incomplete.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hubitat-exporter.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HUBITAT_EXPORTER_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("HUBITAT_EXPORTER_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("HUBITAT_EXPORTER_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("HUBITAT_HUB_URL") {
            self.hub.url = val;
        }
        if let Some(val) = var("HUBITAT_ACCESS_TOKEN") {
            self.hub.access_token = val;
        }
        if let Some(app_id) = var("HUBITAT_APP_ID").and_then(|val| val.parse().ok()) {
            self.hub.app_id = app_id;
        }
        if let Some(val) = var("OWM_API_KEY") {
            self.weather.api_key = val;
        }
        if let Some(city_id) = var("OWM_CITY_ID").and_then(|val| val.parse().ok()) {
            self.weather.city_id = city_id;
        }
        if let Some(val) = var("HUBITAT_EXPORTER_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.hub.url.trim().is_empty() {
            return Err(ConfigError::MissingHubUrl);
        }
        let hub_url = url::Url::parse(&self.hub.url)?;
        if !matches!(hub_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "hub url scheme must be http or https, got `{}`",
                hub_url.scheme()
            )));
        }
        if self.hub.access_token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        if self.hub.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "hub timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.weather.is_enabled() && self.weather.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "weather timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hubitat_exporterd=info,hubitat_exporter=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// No hub URL in the file nor in `HUBITAT_HUB_URL`.
    #[error("missing hub url (set [hub] url or HUBITAT_HUB_URL)")]
    MissingHubUrl,
    /// The hub URL cannot be parsed.
    #[error("invalid hub url")]
    InvalidUrl(#[from] url::ParseError),
    /// No access token in the file nor in `HUBITAT_ACCESS_TOKEN`.
    #[error("missing access token (set [hub] access_token or HUBITAT_ACCESS_TOKEN)")]
    MissingAccessToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn hub_config() -> Config {
        let mut config = Config::default();
        config.hub.url = "http://hubitat.local".to_string();
        config.hub.access_token = "secret".to_string();
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.hub.app_id, 33);
        assert!(!config.weather.is_enabled());
        assert_eq!(
            config.logging.filter,
            "hubitat_exporterd=info,hubitat_exporter=info,tower_http=debug"
        );
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8081);
        assert!(config.hub.url.is_empty());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9100

            [hub]
            url = 'http://10.0.0.2'
            access_token = 'abc'
            app_id = 12

            [weather]
            api_key = 'owm'
            city_id = 2988507

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.hub.url, "http://10.0.0.2");
        assert_eq!(config.hub.access_token, "abc");
        assert_eq!(config.hub.app_id, 12);
        assert!(config.weather.is_enabled());
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = hub_config();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_require_hub_url() {
        let mut config = hub_config();
        config.hub.url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::MissingHubUrl)));
    }

    #[test]
    fn should_reject_malformed_hub_url() {
        let mut config = hub_config();
        config.hub.url = "hubitat.local".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn should_reject_non_http_hub_url() {
        let mut config = hub_config();
        config.hub.url = "ftp://hubitat.local".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = hub_config();
        config.hub.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = hub_config();
        config.weather.api_key = "owm".to_string();
        config.weather.city_id = 2_988_507;
        config.weather.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_require_access_token() {
        let mut config = hub_config();
        config.hub.access_token = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingAccessToken)
        ));
    }

    #[test]
    fn should_override_hub_from_environment() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("HUBITAT_HUB_URL", "http://192.168.1.20"),
            ("HUBITAT_ACCESS_TOKEN", "from-env"),
            ("HUBITAT_APP_ID", "41"),
        ]));
        assert_eq!(config.hub.url, "http://192.168.1.20");
        assert_eq!(config.hub.access_token, "from-env");
        assert_eq!(config.hub.app_id, 41);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_override_bind_address_from_environment() {
        let mut config = hub_config();
        config.apply_overrides(env(&[("HUBITAT_EXPORTER_BIND", "127.0.0.1:9200")]));
        assert_eq!(config.bind_addr(), "127.0.0.1:9200");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = hub_config();
        config.apply_overrides(env(&[("HUBITAT_EXPORTER_PORT", "eighty")]));
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn should_enable_weather_from_environment() {
        let mut config = hub_config();
        config.apply_overrides(env(&[("OWM_API_KEY", "k"), ("OWM_CITY_ID", "2988507")]));
        assert!(config.weather.is_enabled());
        assert_eq!(config.weather.city_id, 2_988_507);
    }

    #[test]
    fn should_prefer_rust_log_over_exporter_log() {
        let mut config = hub_config();
        config.apply_overrides(env(&[
            ("HUBITAT_EXPORTER_LOG", "info"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
    }
}
