//! Scrape endpoint handler.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use hubitat_exporter_app::ports::{DeviceSource, MetricsExposition, MetricsSink, WeatherSource};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the scrape endpoint.
pub enum ScrapeResponse {
    Ok {
        content_type: &'static str,
        body: String,
    },
}

impl IntoResponse for ScrapeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok { content_type, body } => {
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
        }
    }
}

/// `GET /metrics`
///
/// # Errors
///
/// Returns [`ApiError::Scrape`] when the hub cannot be fetched, and
/// [`ApiError::Render`] when the gauges cannot be encoded.
pub async fn scrape<S, M, W>(
    State(state): State<AppState<S, M, W>>,
) -> Result<ScrapeResponse, ApiError>
where
    S: DeviceSource + Send + Sync + 'static,
    M: MetricsSink + MetricsExposition + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    state.scrape_service.scrape().await?;

    let sink = state.scrape_service.sink();
    let body = sink
        .render()
        .map_err(|err| ApiError::Render(Box::new(err)))?;
    Ok(ScrapeResponse::Ok {
        content_type: sink.content_type(),
        body,
    })
}
