//! Scrape service — one fetch → filter → read → emit cycle per metrics
//! request.
//!
//! A cycle fetches every device, resets each gauge, then emits one sample per
//! readable `(capability, device)` pair. A failed fetch aborts the cycle
//! before any gauge is touched. A device whose attribute cannot be read is
//! logged and skipped; its siblings are still emitted.

use hubitat_exporter_domain::device::Devices;
use hubitat_exporter_domain::error::FetchError;
use hubitat_exporter_domain::metric::{GaugeValue, Metric, OUTSIDE_DEVICE};
use hubitat_exporter_domain::view::{
    Battery, Humidity, Illuminance, Lock, Reading, Switch, SwitchLevel, Temperature,
};

use crate::ports::{DeviceSource, MetricsSink, NoWeather, Weather, WeatherSource};

/// Outcome of one scrape cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Devices returned by the hub.
    pub devices: usize,
    /// Samples handed to the sink.
    pub emitted: usize,
    /// Readings skipped because the device attribute was unusable.
    pub skipped: usize,
}

/// Application service driving scrape cycles.
pub struct ScrapeService<S, M, W = NoWeather> {
    source: S,
    sink: M,
    weather: Option<W>,
}

impl<S, M> ScrapeService<S, M>
where
    S: DeviceSource,
    M: MetricsSink,
{
    /// Create a new service reading from `source` and writing to `sink`.
    pub fn new(source: S, sink: M) -> Self {
        Self {
            source,
            sink,
            weather: None,
        }
    }
}

impl<S, M, W> ScrapeService<S, M, W> {
    /// Also export outdoor conditions from `weather` on every cycle.
    pub fn with_weather<W2: WeatherSource>(self, weather: W2) -> ScrapeService<S, M, W2> {
        ScrapeService {
            source: self.source,
            sink: self.sink,
            weather: Some(weather),
        }
    }

    /// The sink the service writes to.
    pub fn sink(&self) -> &M {
        &self.sink
    }
}

impl<S, M, W> ScrapeService<S, M, W>
where
    S: DeviceSource + Sync,
    M: MetricsSink + Sync,
    W: WeatherSource + Sync,
{
    /// Run one scrape cycle.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the device source. No gauge is reset or
    /// set in that case.
    #[tracing::instrument(skip(self))]
    pub async fn scrape(&self) -> Result<ScrapeReport, FetchError> {
        let devices = self.source.fetch_devices().await?;

        let weather = match &self.weather {
            Some(source) => match source.current().await {
                Ok(weather) => Some(weather),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to fetch outdoor weather");
                    None
                }
            },
            None => None,
        };

        let mut report = extract_readings(&devices, &self.sink);
        if let Some(weather) = weather {
            report.emitted += emit_weather(weather, &self.sink);
        }

        tracing::debug!(
            devices = report.devices,
            emitted = report.emitted,
            skipped = report.skipped,
            "scrape cycle complete"
        );
        Ok(report)
    }
}

/// Reset every gauge, then emit every readable capability of `devices`.
pub fn extract_readings<M: MetricsSink>(devices: &Devices, sink: &M) -> ScrapeReport {
    for metric in Metric::ALL {
        sink.reset(metric);
    }

    let mut report = ScrapeReport {
        devices: devices.len(),
        ..ScrapeReport::default()
    };
    emit::<Battery, _>(devices, sink, &mut report);
    emit::<Temperature, _>(devices, sink, &mut report);
    emit::<Illuminance, _>(devices, sink, &mut report);
    emit::<Humidity, _>(devices, sink, &mut report);
    emit::<Switch, _>(devices, sink, &mut report);
    emit::<SwitchLevel, _>(devices, sink, &mut report);
    emit::<Lock, _>(devices, sink, &mut report);
    report
}

fn emit<R: Reading, M: MetricsSink>(devices: &Devices, sink: &M, report: &mut ScrapeReport) {
    for view in devices.views::<R>() {
        match view.read() {
            Ok(value) => {
                sink.set(R::METRIC, view.display_name(), value.as_gauge());
                report.emitted += 1;
            }
            Err(err) => {
                tracing::warn!(
                    device = %err.device,
                    attribute = R::ATTRIBUTE,
                    error = %err.source,
                    "failed to read device attribute"
                );
                report.skipped += 1;
            }
        }
    }
}

fn emit_weather<M: MetricsSink>(weather: Weather, sink: &M) -> usize {
    sink.set(Metric::Temperature, OUTSIDE_DEVICE, weather.temperature);
    sink.set(Metric::Humidity, OUTSIDE_DEVICE, weather.humidity / 100.0);
    2
}
