//! NetBox client errors

use thiserror::Error;

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NetBox API answered with a non-success status
    #[error("NetBox API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization of a request body failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body could not be decoded into the expected model
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., unknown status value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl NetBoxError {
    /// Builds an [`NetBoxError::Api`] from a status code and response body.
    pub fn api(status: impl Into<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status: status.into(),
            message: message.into(),
        }
    }
}
