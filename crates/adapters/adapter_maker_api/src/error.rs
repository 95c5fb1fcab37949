//! Maker API adapter error types.

use hubitat_exporter_domain::error::FetchError;

/// Errors specific to the Maker API adapter.
///
/// Request errors never carry the request URL: it contains the access token.
#[derive(Debug, thiserror::Error)]
pub enum MakerApiError {
    /// The configured hub URL does not parse.
    #[error("invalid hub URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured hub URL is not `http` or `https`.
    #[error("unsupported hub URL scheme `{0}`")]
    UnsupportedScheme(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed, timed out, or the hub answered with an error status.
    #[error("failed to request devices")]
    Request(#[source] reqwest::Error),

    /// The hub answered with a body that is not a device list.
    #[error("failed to decode devices")]
    Decode(#[source] serde_json::Error),
}

impl MakerApiError {
    /// Convert into a [`FetchError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> FetchError {
        match self {
            Self::Decode(err) => FetchError::Decode(Box::new(err)),
            other => FetchError::Transport(Box::new(other)),
        }
    }
}

impl From<MakerApiError> for FetchError {
    fn from(err: MakerApiError) -> Self {
        err.into_domain()
    }
}
