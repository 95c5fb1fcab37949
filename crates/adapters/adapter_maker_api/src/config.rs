//! Maker API connection configuration.

use serde::Deserialize;

/// Configuration for the Maker API client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MakerApiConfig {
    /// Base URL of the hub (e.g. `http://192.168.1.20`) or of the cloud
    /// endpoint.
    pub url: String,
    /// Access token protecting the Maker API instance.
    pub access_token: String,
    /// Id of the Maker API app instance on the hub.
    pub app_id: u32,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for MakerApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            access_token: String::new(),
            app_id: 33,
            timeout_secs: 10,
        }
    }
}
