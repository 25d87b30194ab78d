//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the bug tracker or activity feed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// A request URL could not be built.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The requested ticket does not exist or is not visible.
    #[error("bug {0} not found")]
    NotFound(u64),
}
