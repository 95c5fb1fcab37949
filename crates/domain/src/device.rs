//! Device — one hub device as reported by a single poll, and the collection
//! returned by one fetch.
//!
//! A [`Device`] is decoded fresh on every polling cycle and never mutated
//! afterwards. Capability filtering over a [`Devices`] collection produces
//! borrowed [`CapabilityView`]s, so a view can never outlive its record.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::attribute::{AttributeValue, Attributes};
use crate::capability::{Capabilities, Capability};
use crate::id::DeviceId;
use crate::view::{
    BatteryDevice, CapabilityView, HumidityDevice, IlluminanceDevice, LockDevice, Reading,
    SwitchDevice, SwitchLevelDevice, TemperatureDevice,
};

/// A command a device supports. Listed for completeness, never invoked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCommand")]
pub struct Command {
    /// Command name (e.g. `setLevel`).
    pub name: String,
    /// Number of arguments the command takes.
    pub arity: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommand {
    Name(String),
    Detailed {
        command: String,
        #[serde(default)]
        params: Option<Vec<serde_json::Value>>,
    },
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        match raw {
            RawCommand::Name(name) => Self { name, arity: 0 },
            RawCommand::Detailed { command, params } => Self {
                name: command,
                arity: params.map_or(0, |params| params.len()),
            },
        }
    }
}

/// A device descriptor as returned by the Maker API.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// User-facing override of `name`; empty when unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Capabilities,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<Command>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Device {
    /// Create a device with no label, capabilities, attributes or commands.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: String::new(),
            device_type: String::new(),
            model: None,
            manufacturer: None,
            capabilities: Capabilities::default(),
            attributes: Attributes::default(),
            commands: Vec::new(),
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replace the declared capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities = capabilities.into_iter().collect();
        self
    }

    /// Replace the reported attributes.
    #[must_use]
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.attributes = attributes.into_iter().collect();
        self
    }

    /// Name shown to users: the label when set, the name otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Whether the device declares `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Device {}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// All devices returned by one fetch, in the order the hub sent them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Devices(Vec<Device>);

impl Devices {
    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
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

    /// Devices declaring `capability`, in source order.
    pub fn with_capability<'a>(
        &'a self,
        capability: &Capability,
    ) -> impl Iterator<Item = &'a Device> + use<'a> {
        let capability = capability.clone();
        self.0
            .iter()
            .filter(move |device| device.has_capability(&capability))
    }

    /// Every device declaring `R`'s capability, wrapped in the matching view.
    #[must_use]
    pub fn views<R: Reading>(&self) -> Vec<CapabilityView<'_, R>> {
        self.0.iter().filter_map(CapabilityView::<R>::new).collect()
    }

    /// Devices declaring [`Capability::BATTERY`].
    #[must_use]
    pub fn battery_devices(&self) -> Vec<BatteryDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::TEMPERATURE_MEASUREMENT`].
    #[must_use]
    pub fn temperature_devices(&self) -> Vec<TemperatureDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::ILLUMINANCE_MEASUREMENT`].
    #[must_use]
    pub fn illuminance_devices(&self) -> Vec<IlluminanceDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::RELATIVE_HUMIDITY_MEASUREMENT`].
    #[must_use]
    pub fn humidity_devices(&self) -> Vec<HumidityDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::SWITCH`].
    #[must_use]
    pub fn switch_devices(&self) -> Vec<SwitchDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::SWITCH_LEVEL`].
    #[must_use]
    pub fn switch_level_devices(&self) -> Vec<SwitchLevelDevice<'_>> {
        self.views()
    }

    /// Devices declaring [`Capability::LOCK`].
    #[must_use]
    pub fn lock_devices(&self) -> Vec<LockDevice<'_>> {
        self.views()
    }
}

impl From<Vec<Device>> for Devices {
    fn from(value: Vec<Device>) -> Self {
        Self(value)
    }
}

impl FromIterator<Device> for Devices {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Devices {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
