//! Error types for the hakone chat core.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A shared error type for the hakone crates.
///
/// Remote model failures are *not* part of this enum: they are represented by
/// [`RemoteCallError`] and folded into the message log by the conversation
/// session instead of being returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HakoneError {
    /// A persona id that is not part of the registry.
    #[error("Unknown persona: '{id}'")]
    UnknownPersona { id: String },

    /// An operation was attempted in a session state that does not allow it.
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HakoneError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownPersona error
    pub fn unknown_persona(id: impl Into<String>) -> Self {
        Self::UnknownPersona { id: id.into() }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownPersona error
    pub fn is_unknown_persona(&self) -> bool {
        matches!(self, Self::UnknownPersona { .. })
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HakoneError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HakoneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HakoneError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HakoneError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HakoneError>`.
pub type Result<T> = std::result::Result<T, HakoneError>;

/// Failure of a single remote reply generation.
///
/// The conversation session never inspects the variant; every failure takes
/// the same fallback path. The variants exist for logging and for callers
/// that use a [`crate::reply::ReplyGenerator`] directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallError {
    /// No API key was configured for the remote service.
    #[error("API key is missing (set GEMINI_API_KEY or fill in secret.json)")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The response was well-formed but carried no text.
    #[error("Response contained no text")]
    EmptyResponse,

    /// The call did not complete within the configured bound.
    #[error("No reply within {0:?}")]
    Timeout(Duration),
}
