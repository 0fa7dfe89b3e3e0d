//! Error handling for the ops-shield service.
//!
//! A single error type covers every layer: boundary validation,
//! dataset loading, model training, and the HTTP surface. Handlers
//! return `Result<T>` and the axum integration maps each variant to
//! a status code and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single violated constraint, reported with the field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The main error type for the ops-shield service.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Configuration-related errors (invalid config, missing fields, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors (file operations, socket binding, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors (JSON artifacts, etc.)
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Dataset errors (unreadable CSV, empty file, unknown category)
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Model training/inference errors
    #[error("training error: {0}")]
    Training(String),

    /// Invalid input for a single field
    #[error("invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Request validation failure carrying every violated constraint
    #[error("request validation failed: {} constraint(s) violated", .0.len())]
    Validation(Vec<FieldViolation>),

    /// Internal errors (bugs, unexpected states)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Type alias for Results using OpsError
pub type Result<T> = std::result::Result<T, OpsError>;

impl From<serde_json::Error> for OpsError {
    fn from(err: serde_json::Error) -> Self {
        OpsError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for OpsError {
    fn from(err: csv::Error) -> Self {
        OpsError::Dataset(format!("CSV error: {err}"))
    }
}

impl OpsError {
    /// Determines if this error is a client error (4xx-equivalent).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OpsError::Config(_)
                | OpsError::InvalidInput { .. }
                | OpsError::Validation(_)
                | OpsError::Serialization(_)
        )
    }

    /// Creates an invalid input error for a single field
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        OpsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        OpsError::Config(msg.into())
    }

    /// Creates a dataset error
    #[must_use]
    pub fn dataset(msg: impl Into<String>) -> Self {
        OpsError::Dataset(msg.into())
    }

    /// Creates a training error
    #[must_use]
    pub fn training(msg: impl Into<String>) -> Self {
        OpsError::Training(msg.into())
    }

    /// Creates an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        OpsError::Internal(msg.into())
    }
}

impl IntoResponse for OpsError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            OpsError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            OpsError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            OpsError::Config(_) => (StatusCode::BAD_REQUEST, "config_error"),
            OpsError::Serialization(_) => (StatusCode::BAD_REQUEST, "serialization_error"),
            OpsError::Io(_)
            | OpsError::Dataset(_)
            | OpsError::Training(_)
            | OpsError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut body = serde_json::json!({
            "error": error_type,
            "message": self.to_string(),
        });

        if let OpsError::Validation(violations) = &self {
            body["violations"] = serde_json::json!(violations);
        }

        (status, Json(body)).into_response()
    }
}
