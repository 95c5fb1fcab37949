//! Capability views — typed, single-purpose readings over a borrowed
//! [`Device`].
//!
//! A [`Reading`] marker bundles everything that distinguishes one capability
//! from another: the capability tag, the attribute key, the transform and
//! the gauge it feeds. [`CapabilityView`] is generic over that marker, so
//! the seven views share one implementation and never copy the record.
//!
//! | View | Method | Attribute | Transform |
//! |------|--------|-----------|-----------|
//! | [`BatteryDevice`] | `battery()` | `battery` | percentage |
//! | [`TemperatureDevice`] | `temperature()` | `temperature` | number, device unit |
//! | [`IlluminanceDevice`] | `illuminance()` | `illuminance` | number |
//! | [`HumidityDevice`] | `humidity()` | `humidity` | percentage |
//! | [`SwitchDevice`] | `switch()` | `switch` | `"on"` / `"off"` |
//! | [`SwitchLevelDevice`] | `switch_level()` | `level` | percentage |
//! | [`LockDevice`] | `lock()` | `lock` | `"locked"` / `"unlocked"` |

use std::fmt;
use std::marker::PhantomData;

use crate::attribute::Attributes;
use crate::capability::Capability;
use crate::device::Device;
use crate::error::{AttributeError, ReadingError};
use crate::metric::{GaugeValue, Metric};

/// Describes how one capability is read from a device.
pub trait Reading {
    /// Type of the extracted value.
    type Value: GaugeValue + Copy;

    /// Capability a device must declare to be viewed through this reading.
    const CAPABILITY: Capability;
    /// Attribute holding the raw value.
    const ATTRIBUTE: &'static str;
    /// Gauge the value is exported to.
    const METRIC: Metric;

    /// Extract and convert the value from raw attributes.
    ///
    /// # Errors
    ///
    /// Propagates the attribute accessor failure.
    fn extract(attributes: &Attributes) -> Result<Self::Value, AttributeError>;
}

/// A device seen through one [`Reading`].
pub struct CapabilityView<'a, R> {
    device: &'a Device,
    reading: PhantomData<fn() -> R>,
}

impl<'a, R: Reading> CapabilityView<'a, R> {
    /// Wrap `device` if it declares `R`'s capability.
    #[must_use]
    pub fn new(device: &'a Device) -> Option<Self> {
        device.has_capability(&R::CAPABILITY).then_some(Self {
            device,
            reading: PhantomData,
        })
    }

    /// The wrapped record.
    #[must_use]
    pub fn device(&self) -> &'a Device {
        self.device
    }

    /// Display name of the wrapped record.
    #[must_use]
    pub fn display_name(&self) -> &'a str {
        self.device.display_name()
    }

    /// Read the value from the device's current attributes.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadingError`] carrying the device display name and the
    /// attribute-level cause.
    pub fn read(&self) -> Result<R::Value, ReadingError> {
        R::extract(&self.device.attributes).map_err(|source| ReadingError {
            device: self.device.display_name().to_string(),
            source,
        })
    }
}

impl<R> Clone for CapabilityView<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for CapabilityView<'_, R> {}

impl<R: Reading> fmt::Debug for CapabilityView<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityView")
            .field("capability", &R::CAPABILITY.as_str())
            .field("device", &self.device.id)
            .finish()
    }
}

macro_rules! define_reading {
    (
        $(#[doc = $doc:expr])*
        $marker:ident => $alias:ident::$method:ident() -> $value:ty {
            capability: $capability:expr,
            attribute: $attribute:literal,
            metric: $metric:expr,
            extract: $extract:expr $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug)]
        pub enum $marker {}

        impl Reading for $marker {
            type Value = $value;

            const CAPABILITY: Capability = $capability;
            const ATTRIBUTE: &'static str = $attribute;
            const METRIC: Metric = $metric;

            fn extract(attributes: &Attributes) -> Result<$value, AttributeError> {
                let extract: fn(&Attributes, &str) -> Result<$value, AttributeError> = $extract;
                extract(attributes, $attribute)
            }
        }

        #[doc = concat!("A device viewed through the [`", stringify!($marker), "`] reading.")]
        pub type $alias<'a> = CapabilityView<'a, $marker>;

        impl $alias<'_> {
            #[doc = concat!("Read the `", $attribute, "` attribute of the device.")]
            ///
            /// # Errors
            ///
            /// Returns a [`ReadingError`] when the attribute is missing, is not
            /// a string, or holds an invalid value.
            pub fn $method(&self) -> Result<$value, ReadingError> {
                self.read()
            }
        }
    };
}

define_reading!(
    /// Battery charge, as a fraction (`"87"` → `0.87`).
    Battery => BatteryDevice::battery() -> f64 {
        capability: Capability::BATTERY,
        attribute: "battery",
        metric: Metric::BatteryLevel,
        extract: |attributes, key| attributes.get_percentage(key),
    }
);

define_reading!(
    /// Temperature, in whatever unit the device reports.
    Temperature => TemperatureDevice::temperature() -> f64 {
        capability: Capability::TEMPERATURE_MEASUREMENT,
        attribute: "temperature",
        metric: Metric::Temperature,
        extract: |attributes, key| attributes.get_number(key),
    }
);

define_reading!(
    /// Illuminance, in lux.
    Illuminance => IlluminanceDevice::illuminance() -> f64 {
        capability: Capability::ILLUMINANCE_MEASUREMENT,
        attribute: "illuminance",
        metric: Metric::Illuminance,
        extract: |attributes, key| attributes.get_number(key),
    }
);

define_reading!(
    /// Relative humidity, as a fraction.
    Humidity => HumidityDevice::humidity() -> f64 {
        capability: Capability::RELATIVE_HUMIDITY_MEASUREMENT,
        attribute: "humidity",
        metric: Metric::Humidity,
        extract: |attributes, key| attributes.get_percentage(key),
    }
);

define_reading!(
    /// Switch state, `true` when on.
    Switch => SwitchDevice::switch() -> bool {
        capability: Capability::SWITCH,
        attribute: "switch",
        metric: Metric::Switch,
        extract: |attributes, key| attributes.get_boolean(key, "on", "off"),
    }
);

define_reading!(
    /// Dimmer level, as a fraction.
    SwitchLevel => SwitchLevelDevice::switch_level() -> f64 {
        capability: Capability::SWITCH_LEVEL,
        attribute: "level",
        metric: Metric::SwitchLevel,
        extract: |attributes, key| attributes.get_percentage(key),
    }
);

define_reading!(
    /// Lock state, `true` when locked.
    Lock => LockDevice::lock() -> bool {
        capability: Capability::LOCK,
        attribute: "lock",
        metric: Metric::Lock,
        extract: |attributes, key| attributes.get_boolean(key, "locked", "unlocked"),
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Devices;
    use crate::error::AttributeErrorKind;

    fn single(capability: Capability, attributes: &[(&str, &str)]) -> Device {
        Device::new(1_u64, "Device")
            .with_capabilities([capability])
            .with_attributes(attributes.iter().copied())
    }

    #[test]
    fn should_refuse_to_wrap_device_without_capability() {
        let device = single(Capability::SWITCH, &[("battery", "50")]);
        assert!(BatteryDevice::new(&device).is_none());
        assert!(SwitchDevice::new(&device).is_some());
    }

    #[test]
    fn should_read_battery_as_fraction() {
        let devices: Devices = vec![
            Device::new(1_u64, "Sensor")
                .with_capabilities([Capability::BATTERY])
                .with_attributes([("battery", "87")]),
        ]
        .into();
        let views = devices.battery_devices();
        assert_eq!(views.len(), 1);
        assert!((views[0].battery().unwrap() - 0.87).abs() < 1e-12);
    }

    #[test]
    fn should_read_lock_state_of_door() {
        let devices: Devices = vec![
            Device::new(1_u64, "Door")
                .with_capabilities([Capability::LOCK])
                .with_attributes([("lock", "locked")]),
        ]
        .into();
        let views = devices.lock_devices();
        assert_eq!(views.len(), 1);
        assert!(views[0].lock().unwrap());
    }

    #[test]
    fn should_read_unlocked_as_false() {
        let device = single(Capability::LOCK, &[("lock", "unlocked")]);
        assert!(!LockDevice::new(&device).unwrap().lock().unwrap());
    }

    #[test]
    fn should_read_switch_tokens() {
        let on = single(Capability::SWITCH, &[("switch", "on")]);
        let off = single(Capability::SWITCH, &[("switch", "off")]);
        let odd = single(Capability::SWITCH, &[("switch", "locked")]);
        assert!(SwitchDevice::new(&on).unwrap().switch().unwrap());
        assert!(!SwitchDevice::new(&off).unwrap().switch().unwrap());
        assert_eq!(
            SwitchDevice::new(&odd).unwrap().switch().unwrap_err().kind(),
            AttributeErrorKind::InvalidEnum
        );
    }

    #[test]
    fn should_read_raw_temperature_and_illuminance() {
        let device = Device::new(1_u64, "Multi")
            .with_capabilities([
                Capability::TEMPERATURE_MEASUREMENT,
                Capability::ILLUMINANCE_MEASUREMENT,
            ])
            .with_attributes([("temperature", "71.6"), ("illuminance", "350")]);
        let temperature = TemperatureDevice::new(&device).unwrap().temperature().unwrap();
        let illuminance = IlluminanceDevice::new(&device).unwrap().illuminance().unwrap();
        assert!((temperature - 71.6).abs() < 1e-12);
        assert!((illuminance - 350.0).abs() < 1e-12);
    }

    #[test]
    fn should_read_switch_level_as_fraction() {
        let device = single(Capability::SWITCH_LEVEL, &[("level", "40")]);
        let level = SwitchLevelDevice::new(&device).unwrap().switch_level().unwrap();
        assert!((level - 0.4).abs() < 1e-12);
    }

    #[test]
    fn should_read_humidity_from_humidity_attribute_not_temperature() {
        // A previous exporter revision read `temperature` here.
        let device = single(
            Capability::RELATIVE_HUMIDITY_MEASUREMENT,
            &[("humidity", "45"), ("temperature", "21")],
        );
        let humidity = HumidityDevice::new(&device).unwrap().humidity().unwrap();
        assert!((humidity - 0.45).abs() < 1e-12);

        let without_humidity =
            single(Capability::RELATIVE_HUMIDITY_MEASUREMENT, &[("temperature", "21")]);
        let err = HumidityDevice::new(&without_humidity)
            .unwrap()
            .humidity()
            .unwrap_err();
        assert_eq!(err.kind(), AttributeErrorKind::MissingKey);
        assert_eq!(err.source.key(), "humidity");
    }

    #[test]
    fn should_annotate_failure_with_display_name() {
        let device = Device::new(1_u64, "bad-sensor-01")
            .with_label("Bad")
            .with_capabilities([Capability::BATTERY])
            .with_attributes([("battery", "nope")]);
        let err = BatteryDevice::new(&device).unwrap().battery().unwrap_err();
        assert_eq!(err.device, "Bad");
        assert_eq!(err.kind(), AttributeErrorKind::ParseError);
    }

    #[test]
    fn should_reread_attributes_on_every_call() {
        let device = single(Capability::BATTERY, &[("battery", "10")]);
        let view = BatteryDevice::new(&device).unwrap();
        let first = view.battery().unwrap();
        let second = view.battery().unwrap();
        assert!((first - second).abs() < f64::EPSILON);
    }

    #[test]
    fn should_expose_reading_metadata() {
        assert_eq!(<Humidity as Reading>::ATTRIBUTE, "humidity");
        assert_eq!(<SwitchLevel as Reading>::ATTRIBUTE, "level");
        assert_eq!(<Lock as Reading>::METRIC, Metric::Lock);
        assert_eq!(<Battery as Reading>::CAPABILITY, Capability::BATTERY);
    }
}
