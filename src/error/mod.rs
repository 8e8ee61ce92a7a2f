//! Error types for the Gemini client.
//!
//! The taxonomy follows the failure paths a streaming call can take:
//! transport failures (no upstream status), upstream failures (non-success
//! status with the raw error body), controller-side timeouts, and internal
//! session-table misses. Collaborator failures are never retried or
//! transformed; they pass through to the caller verbatim.

use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// No API key was provided via the builder or environment.
    #[error("Missing API key")]
    MissingApiKey,

    /// The base URL could not be parsed.
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The offending URL string or parse error.
        url: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the rejected value.
        message: String,
    },
}

/// Response decoding errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    /// The response body was not valid JSON for the expected type.
    #[error("Failed to deserialize response: {message}")]
    DeserializationError {
        /// Decoder error description.
        message: String,
    },

    /// The response decoded but did not have the expected shape.
    #[error("Unexpected response format: {message}")]
    UnexpectedFormat {
        /// Description of the shape mismatch.
        message: String,
    },
}

/// Top-level error type for the Gemini client.
#[derive(Error, Debug, Clone)]
pub enum GeminiError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Response decoding error.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// The HTTP round trip failed before any upstream status was received.
    #[error("Transport failure: {message}")]
    Transport {
        /// Description of the network/HTTP-layer failure.
        message: String,
        /// Opaque diagnostic details, when available.
        details: Option<serde_json::Value>,
    },

    /// The API returned a non-success status.
    #[error("Upstream failure ({code}): {message}")]
    Upstream {
        /// The upstream HTTP status code.
        code: u16,
        /// Upstream error message.
        message: String,
        /// The raw error body, passed through untouched.
        body: Option<serde_json::Value>,
    },

    /// The controller's wall-clock budget elapsed before the stream reached
    /// a terminal state. Generated only by the controller, never by a session.
    #[error("Stream timed out after {elapsed:?}")]
    Timeout {
        /// How long the controller waited.
        elapsed: Duration,
    },

    /// A query referenced an unknown or removed stream session.
    ///
    /// Internal to the streaming subsystem; the controller never surfaces
    /// this as a terminal failure to its caller.
    #[error("Stream session not found: {id}")]
    SessionNotFound {
        /// The session id that missed the table.
        id: Uuid,
    },
}

impl GeminiError {
    /// Numeric code for this failure: the upstream status for upstream
    /// failures, 408 for timeouts, 0 otherwise.
    pub fn code(&self) -> u16 {
        match self {
            GeminiError::Upstream { code, .. } => *code,
            GeminiError::Timeout { .. } => 408,
            _ => 0,
        }
    }

    /// Build a transport failure from a message.
    pub fn transport(message: impl Into<String>) -> Self {
        GeminiError::Transport {
            message: message.into(),
            details: None,
        }
    }

    /// Returns true if this is a controller-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeminiError::Timeout { .. })
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Transport {
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for GeminiError {
    fn from(err: url::ParseError) -> Self {
        GeminiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let transport = GeminiError::transport("connection reset");
        assert_eq!(transport.code(), 0);

        let upstream = GeminiError::Upstream {
            code: 429,
            message: "rate limited".to_string(),
            body: None,
        };
        assert_eq!(upstream.code(), 429);

        let timeout = GeminiError::Timeout {
            elapsed: Duration::from_secs(30),
        };
        assert_eq!(timeout.code(), 408);
        assert!(timeout.is_timeout());
    }

    #[test]
    fn test_session_not_found_is_code_zero() {
        let id = Uuid::new_v4();
        let err = GeminiError::SessionNotFound { id };
        assert_eq!(err.code(), 0);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_config_error_code_is_zero() {
        let err = GeminiError::Configuration(ConfigurationError::MissingApiKey);
        assert_eq!(err.code(), 0);
        assert!(!err.is_timeout());
    }
}
