//! Error types for Fever API calls.
//!
//! Transport failures, HTTP error statuses, malformed bodies and credential
//! rejection all surface as a [`FeverError`]. Callers in the sync pipeline
//! treat every variant the same way: the response carries no usable data.

use thiserror::Error;

/// Why a Fever API call produced no usable data.
#[derive(Debug, Error)]
pub enum FeverError {
    /// Network-level error (DNS, connection refused, TLS, timeout).
    #[error("network error calling Fever '{operation}': {source}")]
    Network {
        /// The Fever operation selector.
        operation: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("HTTP {status} from Fever '{operation}'")]
    HttpStatus {
        /// The Fever operation selector.
        operation: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not a Fever JSON response.
    #[error("unexpected response from Fever '{operation}': {reason}")]
    Decode {
        /// The Fever operation selector.
        operation: String,
        /// Parser message.
        reason: String,
    },

    /// The server answered with `auth = 0`.
    #[error(
        "Fever rejected the api key for '{operation}'\n  Suggestion: Check --user and --password"
    )]
    Unauthenticated {
        /// The Fever operation selector.
        operation: String,
    },
}

impl FeverError {
    /// Creates a network error.
    pub fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            operation: operation.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(operation: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            operation: operation.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(operation: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an unauthenticated error.
    pub fn unauthenticated(operation: impl Into<String>) -> Self {
        Self::Unauthenticated {
            operation: operation.into(),
        }
    }

    /// True when the server itself rejected the credentials.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}
