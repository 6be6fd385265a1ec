//! Contract error types for purge dispatch
//!
//! These errors are transport-agnostic; the REST layer maps them to problem
//! details and the native client returns them as-is.

use thiserror::Error;

/// Purge dispatch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurgeError {
    /// Malformed purge target
    #[error("Validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },
    /// A setting required for this purge is empty
    #[error("Purgely is not configured: {setting} is missing")]
    NotConfigured {
        /// Name of the missing setting
        setting: &'static str,
    },
    /// Full-service purge requested without permission
    #[error("Purging the whole cache is not allowed")]
    PurgeAllNotAllowed,
    /// The CDN answered with a non-success status
    #[error("Fastly API returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// The request never reached the CDN or the response was unreadable
    #[error("Transport error: {message}")]
    Transport {
        /// Underlying error message
        message: String,
    },
    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl PurgeError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
