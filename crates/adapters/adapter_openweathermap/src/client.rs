//! Current-weather HTTP client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use url::{Position, Url};

use hubitat_exporter_app::ports::{Weather, WeatherSource};
use hubitat_exporter_domain::error::FetchError;

use crate::config::WeatherConfig;
use crate::error::WeatherError;

#[derive(Deserialize)]
struct CurrentWeather {
    main: MainConditions,
}

#[derive(Deserialize)]
struct MainConditions {
    temp: f64,
    humidity: f64,
}

/// Client fetching current conditions for one city.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    current_url: Url,
    http: reqwest::Client,
}

// The query carries the credentials.
impl fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("current_url", &&self.current_url[..Position::AfterPath])
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidUrl`] for a bad base URL and
    /// [`WeatherError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut current_url = Url::parse(&config.base_url)?.join("/data/2.5/weather")?;
        current_url
            .query_pairs_mut()
            .append_pair("id", &config.city_id.to_string())
            .append_pair("units", "metric")
            .append_pair("appid", &config.api_key);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self { current_url, http })
    }

    /// Fetch current temperature (°C) and relative humidity (%).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Request`] on transport failure or error
    /// status, and [`WeatherError::Decode`] on an unexpected body.
    #[tracing::instrument(skip(self))]
    pub async fn get_current(&self) -> Result<Weather, WeatherError> {
        let body = self
            .http
            .get(self.current_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| WeatherError::Request(err.without_url()))?
            .bytes()
            .await
            .map_err(|err| WeatherError::Request(err.without_url()))?;

        let current: CurrentWeather = serde_json::from_slice(&body).map_err(WeatherError::Decode)?;
        Ok(Weather {
            temperature: current.main.temp,
            humidity: current.main.humidity,
        })
    }
}

impl WeatherSource for OpenWeatherMapClient {
    fn current(&self) -> impl Future<Output = Result<Weather, FetchError>> + Send {
        async move { self.get_current().await.map_err(WeatherError::into_domain) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(base_url: String) -> WeatherConfig {
        WeatherConfig {
            api_key: "k3y".to_string(),
            city_id: 2_988_507,
            base_url,
            timeout_secs: 5,
        }
    }

    #[test]
    fn should_redact_api_key_from_debug_output() {
        let client =
            OpenWeatherMapClient::new(&config("https://api.openweathermap.org".to_string()))
                .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("https://api.openweathermap.org/data/2.5/weather"));
        assert!(!debug.contains("k3y"));
    }

    #[tokio::test]
    async fn should_fetch_current_conditions_in_metric_units() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".to_string(), "2988507".to_string()),
                Matcher::UrlEncoded("units".to_string(), "metric".to_string()),
                Matcher::UrlEncoded("appid".to_string(), "k3y".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"name": "Paris", "main": {"temp": 14.2, "humidity": 77, "pressure": 1012}}"#)
            .create_async()
            .await;

        let client = OpenWeatherMapClient::new(&config(server.url())).unwrap();
        let weather = client.current().await.unwrap();

        mock.assert_async().await;
        assert!((weather.temperature - 14.2).abs() < 1e-12);
        assert!((weather.humidity - 77.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn should_report_missing_main_section_as_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"cod": "404"}"#)
            .create_async()
            .await;

        let client = OpenWeatherMapClient::new(&config(server.url())).unwrap();
        let err = client.current().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn should_report_rejected_key_as_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = OpenWeatherMapClient::new(&config(server.url())).unwrap();
        let err = client.get_current().await.unwrap_err();

        assert!(matches!(err, WeatherError::Request(_)));
        assert!(!format!("{err:?}").contains("k3y"));
    }
}
