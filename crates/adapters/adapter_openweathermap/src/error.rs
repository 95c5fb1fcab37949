//! `OpenWeatherMap` adapter error types.

use hubitat_exporter_domain::error::FetchError;

/// Errors specific to the weather adapter.
///
/// Request errors never carry the request URL: it contains the API key.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The configured base URL does not parse.
    #[error("invalid weather API URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed, timed out, or returned an error status.
    #[error("failed to request current weather")]
    Request(#[source] reqwest::Error),

    /// The body is not a current-weather document.
    #[error("failed to decode current weather")]
    Decode(#[source] serde_json::Error),
}

impl WeatherError {
    /// Convert into a [`FetchError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> FetchError {
        match self {
            Self::Decode(err) => FetchError::Decode(Box::new(err)),
            other => FetchError::Transport(Box::new(other)),
        }
    }
}

impl From<WeatherError> for FetchError {
    fn from(err: WeatherError) -> Self {
        err.into_domain()
    }
}
