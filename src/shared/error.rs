//! Shared Error Types
//!
//! Error types that do not depend on the server stack. They are produced by
//! the domain rules in `shared` and wrapped by `BackendError` on the server.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - a single field failed validation
//! - `ParseError` - an enum-like value (role, weekday, status...) was not recognised
//!
//! Form-style validation that reports every bad field at once uses
//! [`FieldErrors`] instead of a single `ValidationError`.
//!
//! # Usage
//!
//! ```rust
//! use family_gym::shared::error::{FieldErrors, SharedError};
//!
//! let error = SharedError::validation("email", "Email is not valid");
//!
//! let mut errors = FieldErrors::new();
//! errors.add("day", "Day of week is required");
//! assert!(errors.into_result().is_err());
//! ```
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Unrecognised enum-like value
    #[error("Unknown {kind}: '{value}'")]
    ParseError {
        /// What was being parsed (e.g. "role")
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse(kind: &'static str, value: impl Into<String>) -> Self {
        Self::ParseError {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Per-field validation messages, keyed by the field's wire name.
///
/// Keeps the first message recorded for a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless one is already present
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Merge another set of errors, prefixing each field name
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.0 {
            self.add(format!("{prefix}.{field}"), message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<SharedError> for FieldErrors {
    fn from(err: SharedError) -> Self {
        let mut errors = FieldErrors::new();
        match err {
            SharedError::ValidationError { field, message } => errors.add(field, message),
            other => errors.add("body", other.to_string()),
        }
        errors
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
