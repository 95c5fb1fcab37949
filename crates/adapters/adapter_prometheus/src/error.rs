//! Prometheus adapter error types.

/// Errors specific to the Prometheus adapter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Creating, registering or encoding a metric failed.
    #[error("prometheus error")]
    Prometheus(#[from] prometheus::Error),

    /// The encoder produced bytes that are not UTF-8.
    #[error("metrics exposition is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
