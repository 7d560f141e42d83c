//! Error types used throughout the Citadel client

use thiserror::Error;

/// Categories of client errors, mirroring where in the round trip they arise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitadelErrorCategory {
    /// Bad construction input or configuration source
    Configuration,
    /// Request DTO could not be encoded
    Serialization,
    /// Network, TLS or timeout failure inside the transport
    Transport,
    /// Server rejected the request with HTTP 400
    Application,
    /// Server answered with a status that is neither 2xx nor 400
    UnexpectedStatus,
    /// Response body did not have the expected shape
    MalformedResponse,
}

/// Main error type for the Citadel client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CitadelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Application-level rejection (HTTP 400) carrying the server's error body.
    #[error("API error ({error_id}): {error}")]
    Api { error_id: String, error: String },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// `field` is the JSON path of the offending value, e.g.
    /// `session.identities[0].assignedAt`.
    #[error("Malformed response at `{field}`: {reason}")]
    MalformedResponse { field: String, reason: String },
}

impl CitadelError {
    /// Build a [`CitadelError::MalformedResponse`] for the given JSON path.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse { field: field.into(), reason: reason.into() }
    }

    /// Get the error category for this error
    pub fn category(&self) -> CitadelErrorCategory {
        match self {
            Self::Config(_) => CitadelErrorCategory::Configuration,
            Self::Serialization(_) => CitadelErrorCategory::Serialization,
            Self::Transport(_) => CitadelErrorCategory::Transport,
            Self::Api { .. } => CitadelErrorCategory::Application,
            Self::UnexpectedStatus { .. } => CitadelErrorCategory::UnexpectedStatus,
            Self::MalformedResponse { .. } => CitadelErrorCategory::MalformedResponse,
        }
    }

    /// HTTP status the server answered with, when the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { .. } => Some(400),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-assigned error identifier for HTTP 400 rejections.
    pub fn error_id(&self) -> Option<&str> {
        match self {
            Self::Api { error_id, .. } => Some(error_id),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CitadelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Citadel operations
pub type Result<T> = std::result::Result<T, CitadelError>;
