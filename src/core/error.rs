//! Typed error handling for the record core
//!
//! Every failure the crate can report belongs to one of a few categories, so
//! callers (and the REST exposure) can match on them instead of inspecting
//! strings.
//!
//! # Error Categories
//!
//! - [`ValidationErrors`]: every field violation found in a submitted form
//! - [`QueryError`]: malformed date range or timestamp in a records query
//! - [`StorageError`]: failures of the record store itself
//! - [`ConfigError`]: nonsensical configuration values
//!
//! # Example
//!
//! ```rust,ignore
//! match validator.validate(input) {
//!     Ok(details) => store.insert(details)?,
//!     Err(errors) => {
//!         for error in errors.iter() {
//!             println!("{}: {}", error.field, error.message);
//!         }
//!     }
//! }
//! ```

use crate::core::validation::FormField;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the record core
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The submitted form violated one or more field rules
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A records query could not be evaluated
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The record store failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration was rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No record carries the requested id
    #[error("record with id '{id}' not found")]
    NotFound { id: Uuid },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RecordsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecordsError::Query(_) => StatusCode::BAD_REQUEST,
            RecordsError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordsError::Storage(_) | RecordsError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RecordsError::Validation(_) => "VALIDATION_ERROR",
            RecordsError::Query(e) => e.error_code(),
            RecordsError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordsError::Storage(_) => "STORAGE_ERROR",
            RecordsError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RecordsError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            RecordsError::Query(QueryError::InvalidRange { from, to }) => {
                Some(serde_json::json!({ "from": from, "to": to }))
            }
            RecordsError::NotFound { id } => Some(serde_json::json!({ "id": id.to_string() })),
            _ => None,
        }
    }
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Category of a single field violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A required value was absent
    MissingField,
    /// The value does not have the expected shape
    FormatError,
    /// A numeric value or a text length is outside its bounds
    OutOfRange,
    /// The value is not one of the enumerated choices
    InvalidEnum,
    /// The attachment MIME type is not accepted
    UnsupportedType,
    /// The attachment exceeds the size cap
    TooLarge,
    /// Two individually valid fields contradict each other
    CrossFieldViolation,
}

/// One violated rule, addressed to the form field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FormField,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Every violation found in one form submission, in form order
///
/// Never empty when produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Violations attached to one field
    pub fn for_field(&self, field: FormField) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    /// Whether `field` failed with `kind`
    pub fn has(&self, field: FormField, kind: ErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }

    /// Field name to messages, the shape a form renderer annotates inputs with
    pub fn messages_by_field(&self) -> BTreeMap<&'static str, Vec<&str>> {
        let mut map: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.field.as_str())
                .or_default()
                .push(error.message.as_str());
        }
        map
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Validation failed: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while deriving a records view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The lower bound lies after the upper bound
    #[error("invalid date range: from {from} is after to {to}")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// A range bound could not be parsed
    #[error("invalid timestamp '{value}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidTimestamp { value: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidRange { .. } => "INVALID_RANGE",
            QueryError::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A writer panicked while holding the store lock
    #[error("record store lock poisoned during {operation}")]
    LockPoisoned { operation: &'static str },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value is outside what the validator can work with
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// A specialized Result type for record core operations
pub type RecordsResult<T> = Result<T, RecordsError>;
