//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hubitat_exporter_domain::error::{BoxError, FetchError};

/// Failure of a `/metrics` request.
#[derive(Debug)]
pub enum ApiError {
    /// The hub could not be fetched; no gauge was touched.
    Scrape(FetchError),
    /// The gauges could not be rendered.
    Render(BoxError),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::Scrape(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Scrape(err) => {
                let message = error_chain(err);
                tracing::error!(error = %message, "scrape failed");
                message
            }
            Self::Render(err) => {
                let message = error_chain(err.as_ref());
                tracing::error!(error = %message, "failed to render metrics");
                message
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {message}\n"),
        )
            .into_response()
    }
}

/// Join an error and all of its sources with `": "`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_join_error_sources() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(error_chain(&err), "request failed: connection refused");
    }

    #[test]
    fn should_map_scrape_error_to_internal_server_error() {
        let response = ApiError::from(FetchError::Decode("expected array".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
