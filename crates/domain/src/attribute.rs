//! Attribute store — raw device state as reported by the hub, with typed
//! accessors that parse and validate on read.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::AttributeError;

/// A single loosely-typed attribute value.
///
/// The hub reports most values as strings (`"87"`, `"on"`), occasionally as
/// bare numbers, and uses `null` for attributes the device has never
/// reported. Anything else (booleans, arrays, objects) is kept as
/// [`Structured`](Self::Structured) so one odd attribute never fails the
/// decoding of a whole device list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum AttributeValue {
    Text(String),
    Number(serde_json::Number),
    Absent,
    Structured(serde_json::Value),
}

impl AttributeValue {
    /// Human-readable kind, used in type-mismatch diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Absent => "null",
            Self::Structured(_) => "structured value",
        }
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::Null => Self::Absent,
            other => Self::Structured(other),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Per-device mapping of attribute name to raw value.
///
/// Built once from the decoded payload and read-only afterwards; every
/// accessor is a pure function of the stored values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Attributes(HashMap<String, AttributeValue>);

impl Attributes {
    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read `key` as a number encoded in a string (e.g. `"21.5"`).
    ///
    /// # Errors
    ///
    /// - [`AttributeError::MissingKey`] when the key is absent or `null`
    /// - [`AttributeError::TypeMismatch`] when the value is not a string
    /// - [`AttributeError::ParseError`] when the string is not a float
    pub fn get_number(&self, key: &str) -> Result<f64, AttributeError> {
        let text = self.get_text(key)?;
        text.parse::<f64>()
            .map_err(|source| AttributeError::ParseError {
                key: key.to_string(),
                value: text.to_string(),
                source,
            })
    }

    /// Read `key` as a percentage, divided by 100 (`"87"` → `0.87`). Values are
    /// not clamped.
    ///
    /// # Errors
    ///
    /// Same as [`get_number`](Self::get_number).
    pub fn get_percentage(&self, key: &str) -> Result<f64, AttributeError> {
        self.get_number(key).map(|value| value / 100.0)
    }

    /// Read `key` as a boolean encoded by two string tokens.
    ///
    /// # Errors
    ///
    /// - [`AttributeError::MissingKey`] when the key is absent or `null`
    /// - [`AttributeError::TypeMismatch`] when the value is not a string
    /// - [`AttributeError::InvalidEnum`] when the string matches neither token
    pub fn get_boolean(
        &self,
        key: &str,
        true_token: &str,
        false_token: &str,
    ) -> Result<bool, AttributeError> {
        match self.get_text(key)? {
            value if value == true_token => Ok(true),
            value if value == false_token => Ok(false),
            value => Err(AttributeError::InvalidEnum {
                key: key.to_string(),
                value: value.to_string(),
                expected_true: true_token.to_string(),
                expected_false: false_token.to_string(),
            }),
        }
    }

    fn get_text(&self, key: &str) -> Result<&str, AttributeError> {
        match self.0.get(key) {
            None | Some(AttributeValue::Absent) => Err(AttributeError::MissingKey {
                key: key.to_string(),
            }),
            Some(AttributeValue::Text(text)) => Ok(text),
            Some(other) => Err(AttributeError::TypeMismatch {
                key: key.to_string(),
                found: other.kind(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
