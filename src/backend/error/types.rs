/**
 * Backend Error Types
 *
 * Every failure a handler can hit is one `BackendError` variant. Client
 * mistakes carry their own status and message; store, hashing and I/O
 * failures are reported as 500 with a generic message and logged in full
 * when the response is built.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{FieldErrors, SharedError};

#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// One or more request fields failed validation
    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Single-field validation failure
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::InvalidFields(errors)
    }

    /// Get the HTTP status code for this error
    ///
    /// - `RowNotFound` from the store is a 404
    /// - unique-constraint violations are a 409
    /// - other store, hashing, token and I/O failures are a 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidFields(_) => StatusCode::BAD_REQUEST,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => StatusCode::CONFLICT,
            Self::Database(_)
            | Self::Migration(_)
            | Self::Password(_)
            | Self::Token(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } | SharedError::ParseError { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { resource } => format!("{resource} not found"),
            Self::Unauthorized(message) | Self::Forbidden(message) | Self::Conflict(message) => {
                message.clone()
            }
            Self::InvalidFields(_) => "Validation failed".to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Record not found".to_string(),
            Self::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                "A record with the same unique value already exists".to_string()
            }
            Self::SharedError(err) => err.to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Field errors to include in the response body, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidFields(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for BackendError {
    fn from(errors: FieldErrors) -> Self {
        Self::InvalidFields(errors)
    }
}
