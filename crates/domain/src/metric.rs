//! Metric catalogue — the gauges exported for each capability reading.

use std::fmt;

/// Label carrying the device display name on every gauge.
pub const DEVICE_LABEL: &str = "device";

/// Label value used for readings that come from the outdoor weather source.
pub const OUTSIDE_DEVICE: &str = "Outside";

/// One exported gauge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    BatteryLevel,
    Temperature,
    Illuminance,
    Humidity,
    Switch,
    SwitchLevel,
    Lock,
}

impl Metric {
    /// Every gauge, in exposition order.
    pub const ALL: [Self; 7] = [
        Self::BatteryLevel,
        Self::Temperature,
        Self::Illuminance,
        Self::Humidity,
        Self::Switch,
        Self::SwitchLevel,
        Self::Lock,
    ];

    /// Exposition name of the gauge.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BatteryLevel => "hubitat_battery_level_current",
            Self::Temperature => "hubitat_temperature_current",
            Self::Illuminance => "hubitat_illuminance_current",
            Self::Humidity => "hubitat_humidity_current",
            Self::Switch => "hubitat_switch_current",
            Self::SwitchLevel => "hubitat_switch_level_current",
            Self::Lock => "hubitat_lock_current",
        }
    }

    /// Help text of the gauge.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::BatteryLevel => "The current battery level percentage of devices.",
            Self::Temperature => "The current temperature of devices.",
            Self::Illuminance => "The current illuminance of devices.",
            Self::Humidity => "The current humidity percentage of devices.",
            Self::Switch => "The current switch state of devices.",
            Self::SwitchLevel => "The current switch level of devices.",
            Self::Lock => "The current lock state of devices.",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion of a reading into a gauge sample.
pub trait GaugeValue {
    fn as_gauge(self) -> f64;
}

impl GaugeValue for f64 {
    fn as_gauge(self) -> f64 {
        self
    }
}

impl GaugeValue for bool {
    fn as_gauge(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }
}
