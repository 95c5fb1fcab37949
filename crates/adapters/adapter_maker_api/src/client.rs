//! Maker API HTTP client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use url::{Position, Url};

use hubitat_exporter_app::ports::DeviceSource;
use hubitat_exporter_domain::device::Devices;
use hubitat_exporter_domain::error::FetchError;

use crate::config::MakerApiConfig;
use crate::error::MakerApiError;

/// Client for one Maker API app instance.
#[derive(Clone)]
pub struct MakerApiClient {
    devices_url: Url,
    http: reqwest::Client,
}

// The query carries the credentials.
impl fmt::Debug for MakerApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MakerApiClient")
            .field("devices_url", &&self.devices_url[..Position::AfterPath])
            .finish_non_exhaustive()
    }
}

impl MakerApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MakerApiError::InvalidUrl`] or
    /// [`MakerApiError::UnsupportedScheme`] for a bad hub URL, and
    /// [`MakerApiError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &MakerApiConfig) -> Result<Self, MakerApiError> {
        let base = Url::parse(&config.url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(MakerApiError::UnsupportedScheme(base.scheme().to_string()));
        }

        let mut devices_url = base.join(&format!("/apps/api/{}/devices/all", config.app_id))?;
        devices_url
            .query_pairs_mut()
            .append_pair("access_token", &config.access_token);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MakerApiError::Client)?;

        Ok(Self { devices_url, http })
    }

    /// List every device with its capabilities and current attributes.
    ///
    /// # Errors
    ///
    /// Returns [`MakerApiError::Request`] when the hub cannot be reached,
    /// times out or answers with an error status, and
    /// [`MakerApiError::Decode`] when the body is not a device list.
    #[tracing::instrument(skip(self))]
    pub async fn get_devices(&self) -> Result<Devices, MakerApiError> {
        let response = self
            .http
            .get(self.devices_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| MakerApiError::Request(err.without_url()))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| MakerApiError::Request(err.without_url()))?;

        let devices: Devices = serde_json::from_slice(&body).map_err(MakerApiError::Decode)?;
        tracing::debug!(count = devices.len(), "fetched devices");
        Ok(devices)
    }
}

impl DeviceSource for MakerApiClient {
    fn fetch_devices(&self) -> impl Future<Output = Result<Devices, FetchError>> + Send {
        async move { self.get_devices().await.map_err(MakerApiError::into_domain) }
    }
}
