//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `From`.
//! The domain owns the errors that cross port boundaries: attribute
//! extraction failures and fetch failures.

use std::num::ParseFloatError;

/// Why a typed attribute accessor rejected the stored value.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    /// The attribute is not present, or is present with a `null` value.
    #[error("attributes contain no such key: {key}")]
    MissingKey {
        /// Attribute name.
        key: String,
    },

    /// The attribute is present but is not a string.
    #[error("attribute `{key}` was expected to be a string, got {found}")]
    TypeMismatch {
        /// Attribute name.
        key: String,
        /// Kind of value actually stored (e.g. `"number"`).
        found: &'static str,
    },

    /// The attribute is a string that does not parse as a number.
    #[error("attribute `{key}` is not a valid number (got `{value}`)")]
    ParseError {
        /// Attribute name.
        key: String,
        /// Raw stored value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },

    /// The attribute is a string matching neither accepted token.
    #[error(
        "attribute `{key}` is not valid (expected `{expected_true}` or `{expected_false}`, got `{value}`)"
    )]
    InvalidEnum {
        /// Attribute name.
        key: String,
        /// Raw stored value.
        value: String,
        /// Token mapping to `true`.
        expected_true: String,
        /// Token mapping to `false`.
        expected_false: String,
    },
}

/// Discriminant of an [`AttributeError`], convenient for matching in callers
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeErrorKind {
    MissingKey,
    TypeMismatch,
    ParseError,
    InvalidEnum,
}

impl AttributeError {
    /// The failure cause, without its payload.
    #[must_use]
    pub fn kind(&self) -> AttributeErrorKind {
        match self {
            Self::MissingKey { .. } => AttributeErrorKind::MissingKey,
            Self::TypeMismatch { .. } => AttributeErrorKind::TypeMismatch,
            Self::ParseError { .. } => AttributeErrorKind::ParseError,
            Self::InvalidEnum { .. } => AttributeErrorKind::InvalidEnum,
        }
    }

    /// Name of the attribute that failed.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MissingKey { key }
            | Self::TypeMismatch { key, .. }
            | Self::ParseError { key, .. }
            | Self::InvalidEnum { key, .. } => key,
        }
    }
}

/// A capability reading failed for a specific device.
#[derive(Debug, thiserror::Error)]
#[error("failed to read device `{device}`")]
pub struct ReadingError {
    /// Display name of the device.
    pub device: String,
    /// The attribute-level cause.
    #[source]
    pub source: AttributeError,
}

impl ReadingError {
    /// The failure cause, without its payload.
    #[must_use]
    pub fn kind(&self) -> AttributeErrorKind {
        self.source.kind()
    }
}

/// Boxed error used at port boundaries so adapters keep their own types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a collaborator fetch (device list, weather, …).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent, timed out, or returned a non-success
    /// status.
    #[error("request failed")]
    Transport(#[source] BoxError),

    /// The response arrived but its body is malformed.
    #[error("failed to decode response")]
    Decode(#[source] BoxError),
}
