//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hubitat_exporter_app::ports::{DeviceSource, MetricsExposition, MetricsSink, WeatherSource};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the scrape endpoint at `/metrics` and a liveness probe at
/// `/health`. Includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, M, W>(state: AppState<S, M, W>) -> Router
where
    S: DeviceSource + Send + Sync + 'static,
    M: MetricsSink + MetricsExposition + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::metrics::scrape::<S, M, W>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use hubitat_exporter_app::services::scrape_service::ScrapeService;
    use hubitat_exporter_domain::capability::Capability;
    use hubitat_exporter_domain::device::{Device, Devices};
    use hubitat_exporter_domain::error::FetchError;
    use hubitat_exporter_domain::metric::Metric;
    use http_body_util::BodyExt;
    use std::future::Future;
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct StubSource(Option<Vec<Device>>);

    impl DeviceSource for StubSource {
        fn fetch_devices(&self) -> impl Future<Output = Result<Devices, FetchError>> + Send {
            let result = self
                .0
                .clone()
                .map(Devices::from)
                .ok_or_else(|| FetchError::Transport("connection refused".into()));
            async { result }
        }
    }

    /// Renders `name{device} value` lines in the order they were set.
    #[derive(Default)]
    struct TextSink {
        lines: Mutex<Vec<String>>,
    }

    impl MetricsSink for TextSink {
        fn reset(&self, _metric: Metric) {
            self.lines.lock().unwrap().clear();
        }

        fn set(&self, metric: Metric, device: &str, value: f64) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("{metric}{{device=\"{device}\"}} {value}"));
        }
    }

    impl MetricsExposition for TextSink {
        type Error = std::fmt::Error;

        fn content_type(&self) -> &'static str {
            "text/plain; version=0.0.4"
        }

        fn render(&self) -> Result<String, Self::Error> {
            let mut body = self.lines.lock().unwrap().join("\n");
            body.push('\n');
            Ok(body)
        }
    }

    fn app(devices: Option<Vec<Device>>) -> Router {
        let service = ScrapeService::new(StubSource(devices), TextSink::default());
        build(AppState::new(service))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_on_health_check() {
        let response = app(Some(vec![]))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn should_render_metrics_after_scrape() {
        let door = Device::new(1_u64, "front-door")
            .with_label("Front Door")
            .with_capabilities([Capability::LOCK])
            .with_attributes([("lock", "locked")]);

        let response = app(Some(vec![door]))
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
        assert_eq!(
            body_text(response).await,
            "hubitat_lock_current{device=\"Front Door\"} 1\n"
        );
    }

    #[tokio::test]
    async fn should_return_internal_error_when_hub_is_unreachable() {
        let response = app(None)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "Error: request failed: connection refused\n"
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let response = app(Some(vec![]))
            .oneshot(Request::get("/api/devices").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
