//! Error types for the Mend application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Mend application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MendError {
    /// Input validation error (bad form data, empty question, closed terms gate).
    ///
    /// Validation errors are always recoverable: the user corrects the
    /// input and retries. No session state is mutated on this path.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error (missing or unreadable credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote assessment API failure (network, auth, provider error)
    #[error("API error{}: {}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default(), .message)]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MendError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Api error without an HTTP status (e.g., transport failure)
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an Api error carrying the HTTP status returned by the provider
    pub fn api_status(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a remote API error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MendError>`.
pub type Result<T> = std::result::Result<T, MendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let err = MendError::api_status(429, "rate limited");
        assert_eq!(err.to_string(), "API error (HTTP 429): rate limited");
    }

    #[test]
    fn test_api_error_display_without_status() {
        let err = MendError::api("connection refused");
        assert_eq!(err.to_string(), "API error: connection refused");
    }

    #[test]
    fn test_error_classification() {
        assert!(MendError::validation("no supplies").is_validation());
        assert!(MendError::config("no key").is_config());
        assert!(MendError::api("down").is_api());
        assert!(!MendError::internal("bug").is_api());
    }
}
