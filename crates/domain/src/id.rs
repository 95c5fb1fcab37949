//! Opaque device identifier.
//!
//! Hub firmware generations disagree on the JSON type of a device id: older
//! Maker API versions send numbers (`"id": 42`), newer ones send strings
//! (`"id": "42"`). Both are normalised into [`DeviceId`] at decode time so
//! nothing downstream cares which one the deployed hub uses. Decoded string
//! ids are kept verbatim; only [`FromStr`] rejects empty input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Unique identifier for a [`Device`](crate::device::Device) on one hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    /// Textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the identifier, when it has one.
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for DeviceId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identifier text was empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device id must not be empty")]
pub struct EmptyDeviceId;

impl FromStr for DeviceId {
    type Err = EmptyDeviceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyDeviceId);
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeviceId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawDeviceId::deserialize(deserializer)? {
            RawDeviceId::Number(number) => Ok(Self(number.to_string())),
            RawDeviceId::Text(text) => Ok(Self(text)),
        }
    }
}
