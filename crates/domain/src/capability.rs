//! Capabilities — the functional traits a device declares.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// A named functional trait a device declares support for.
///
/// Compared by exact string equality. Tags the exporter does not know about
/// are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// The device reports a battery level.
    pub const BATTERY: Self = Self::from_static("Battery");
    /// The device measures temperature.
    pub const TEMPERATURE_MEASUREMENT: Self = Self::from_static("TemperatureMeasurement");
    /// The device measures illuminance.
    pub const ILLUMINANCE_MEASUREMENT: Self = Self::from_static("IlluminanceMeasurement");
    /// The device measures relative humidity.
    pub const RELATIVE_HUMIDITY_MEASUREMENT: Self =
        Self::from_static("RelativeHumidityMeasurement");
    /// The device can be switched on and off.
    pub const SWITCH: Self = Self::from_static("Switch");
    /// The device is a switch with a level (dimmer).
    pub const SWITCH_LEVEL: Self = Self::from_static("SwitchLevel");
    /// The device can be locked.
    pub const LOCK: Self = Self::from_static("Lock");

    /// Build a capability from a static tag.
    #[must_use]
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// Build a capability from an arbitrary tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// The raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered capabilities of one device. Duplicates are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(Vec<Capability>);

impl Capabilities {
    /// Whether `capability` is declared.
    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.iter().any(|declared| declared == capability)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Capability> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Capability>> for Capabilities {
    fn from(value: Vec<Capability>) -> Self {
        Self(value)
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Capabilities {
    type Item = &'a Capability;
    type IntoIter = std::slice::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Some hub versions interleave attribute descriptors (JSON objects) with the
// capability names; only the names are kept.
impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(tag) => Some(Capability::new(tag)),
                _ => None,
            })
            .collect())
    }
}
