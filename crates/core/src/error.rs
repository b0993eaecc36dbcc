//! Domain error model.

use thiserror::Error;

use crate::id::SerialNumber;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers report it to the operator and carry
/// on. Stream/IO failures are not domain errors and live in the CLI crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A device with this serial number is already registered.
    #[error("device with serial number {0} already exists")]
    DuplicateIdentifier(SerialNumber),

    /// No device with this serial number is registered.
    #[error("device with serial number {0} not found")]
    NotFound(SerialNumber),

    /// A menu or variant choice outside the recognized set.
    #[error("invalid selection: {0:?}")]
    InvalidSelection(String),

    /// Text that should have been a number was not.
    #[error("malformed numeric value: {0:?}")]
    MalformedNumeric(String),

    /// A factory was handed a field bundle without a required key.
    #[error("missing required field: {0}")]
    MissingField(String),
}

impl DomainError {
    pub fn duplicate(serial: impl Into<SerialNumber>) -> Self {
        Self::DuplicateIdentifier(serial.into())
    }

    pub fn not_found(serial: impl Into<SerialNumber>) -> Self {
        Self::NotFound(serial.into())
    }

    pub fn invalid_selection(choice: impl Into<String>) -> Self {
        Self::InvalidSelection(choice.into())
    }

    pub fn malformed_numeric(text: impl Into<String>) -> Self {
        Self::MalformedNumeric(text.into())
    }

    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField(key.into())
    }
}
