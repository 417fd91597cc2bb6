//! Error types for panel API operations.
//!
//! Every failure surfaced by the client is one of two kinds: a local
//! validation failure raised before any request is sent, or an API failure
//! raised by the transport or by response normalization.

use serde::Serialize;
use thiserror::Error;

/// Main error type for panel API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Caller supplied arguments failed a local precondition
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The panel answered with a non-success status
    #[error("API error ({status}): {detail}")]
    Api {
        /// HTTP status code returned by the panel
        status: u16,
        /// Error detail extracted from the response body
        detail: String,
    },

    /// HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out before a response arrived
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response body did not match any accepted envelope shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Request path could not be joined onto the base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for panel API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two error kinds callers need to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Raised locally before any network call.
    Validation,
    /// Raised by the transport or by response normalization.
    Api,
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::UnexpectedResponse(_) => "UNEXPECTED_RESPONSE",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Classifies the error into one of the two error kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) | Self::ConfigError(_) => ErrorKind::Validation,
            Self::Api { .. }
            | Self::HttpError(_)
            | Self::Timeout(_)
            | Self::UnexpectedResponse(_)
            | Self::InvalidEndpoint(_) => ErrorKind::Api,
        }
    }

    /// Returns true for errors raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Returns the HTTP status when the panel answered with an error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::UnexpectedResponse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
