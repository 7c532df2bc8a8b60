//! Error types for MeTube job submission.

use thiserror::Error;

/// Why MeTube did not accept a job.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Network-level error reaching MeTube.
    #[error("network error adding {url} to MeTube: {source}")]
    Network {
        /// Media URL of the job.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("HTTP {status} adding {url} to MeTube")]
    HttpStatus {
        /// Media URL of the job.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The reply was not the expected JSON.
    #[error("unexpected MeTube reply adding {url}: {reason}")]
    Decode {
        /// Media URL of the job.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// MeTube answered `status = "error"`.
    #[error("MeTube rejected {url}: {msg}")]
    Rejected {
        /// Media URL of the job.
        url: String,
        /// MeTube's message.
        msg: String,
    },
}

impl SubmitError {
    /// Creates a network error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a rejection error; a missing message reads "no message".
    pub fn rejected(url: impl Into<String>, msg: Option<String>) -> Self {
        Self::Rejected {
            url: url.into(),
            msg: msg.unwrap_or_else(|| "no message".to_string()),
        }
    }
}
