//! # hubitat-exporterd — Hubitat Prometheus exporter daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize `tracing` with the configured filter
//! - Construct the Maker API client, the Prometheus registry and, when
//!   configured, the weather client
//! - Construct the scrape service, injecting adapters via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use hubitat_exporter_adapter_http_axum::state::AppState;
use hubitat_exporter_adapter_maker_api::MakerApiClient;
use hubitat_exporter_adapter_openweathermap::OpenWeatherMapClient;
use hubitat_exporter_adapter_prometheus::PrometheusMetrics;
use hubitat_exporter_app::ports::{DeviceSource, MetricsExposition, MetricsSink, WeatherSource};
use hubitat_exporter_app::services::scrape_service::ScrapeService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let hub = MakerApiClient::new(&config.hub)?;
    let metrics = PrometheusMetrics::new()?;

    // Services
    let service = ScrapeService::new(hub, metrics);

    let bind_addr = config.bind_addr();
    if config.weather.is_enabled() {
        let weather = OpenWeatherMapClient::new(&config.weather)?;
        tracing::info!(city_id = config.weather.city_id, "exporting outdoor weather");
        serve(&bind_addr, service.with_weather(weather)).await
    } else {
        serve(&bind_addr, service).await
    }
}

async fn serve<S, M, W>(
    bind_addr: &str,
    service: ScrapeService<S, M, W>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: DeviceSource + Send + Sync + 'static,
    M: MetricsSink + MetricsExposition + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let app = hubitat_exporter_adapter_http_axum::router::build(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("hubitat-exporterd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hubitat-exporterd stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
