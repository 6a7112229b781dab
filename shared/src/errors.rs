//! Error types for the Account Service

use thiserror::Error;

/// Reasons a bearer token is rejected
///
/// Every variant is terminal for the request and surfaces as 401 at the
/// HTTP boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,
}

/// Request body that is missing a required field or cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MalformedInput {
    /// Offending field, when the failure is attributable to one
    pub field: Option<String>,
    pub message: String,
}

impl MalformedInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}
