//! Shared application state for axum handlers.

use std::sync::Arc;

use hubitat_exporter_app::ports::{DeviceSource, MetricsExposition, MetricsSink, WeatherSource};
use hubitat_exporter_app::services::scrape_service::ScrapeService;

/// Application state shared across all axum handlers.
///
/// Generic over the device source, metrics sink and weather source to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<S, M, W> {
    /// Scrape use-case; its sink is also what `/metrics` renders.
    pub scrape_service: Arc<ScrapeService<S, M, W>>,
}

impl<S, M, W> Clone for AppState<S, M, W> {
    fn clone(&self) -> Self {
        Self {
            scrape_service: Arc::clone(&self.scrape_service),
        }
    }
}

impl<S, M, W> AppState<S, M, W>
where
    S: DeviceSource + Send + Sync + 'static,
    M: MetricsSink + MetricsExposition + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    /// Create a new application state from the scrape service.
    pub fn new(scrape_service: ScrapeService<S, M, W>) -> Self {
        Self {
            scrape_service: Arc::new(scrape_service),
        }
    }
}
