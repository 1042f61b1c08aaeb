//! Error types for the inventory test-data server.

use thiserror::Error;

/// Failure of a single POST attempt.
///
/// Every variant is retryable; the executor decides when to give up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestFailure {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RequestFailure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RequestFailure::Transport(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            RequestFailure::Transport(format!("Connection error: {}", error))
        } else if error.is_decode() {
            RequestFailure::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            RequestFailure::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            RequestFailure::Transport(format!("HTTP error: {}", error))
        }
    }
}

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed:\n{0}")]
    Validation(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Protocol(err.to_string())
    }
}
