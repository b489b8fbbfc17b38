//! Error types exposed by the review API layer.

use thiserror::Error;

/// Errors surfaced while shaping requests or talking to the review service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The configured base URL could not be parsed or joined.
    #[error("review service URL is invalid: {0}")]
    InvalidUrl(String),

    /// A hotel or review identifier was blank.
    #[error("{kind} identifier must not be blank")]
    InvalidIdentifier {
        /// Which identifier was rejected (`hotel` or `review`).
        kind: &'static str,
    },

    /// No bearer token was available for an authenticated request.
    #[error("an auth token is required (log in with --token)")]
    MissingToken,

    /// Paging parameters were out of range.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Networking failed before a response arrived.
    #[error("network error talking to the review service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The service rejected the bearer token.
    #[error("the review service rejected the token: {message}")]
    Authentication {
        /// Server message returned with the 401/403 response.
        message: String,
    },

    /// The addressed review or hotel does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Request path that returned 404.
        resource: String,
    },

    /// The service answered with any other non-success status.
    #[error("review API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response detail from the service.
        message: String,
    },

    /// A success response body could not be decoded.
    #[error("failed to decode review service response: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Configuration could not be loaded or was incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The session store could not be read or written.
    #[error("session storage error: {message}")]
    Session {
        /// Error detail from the session store.
        message: String,
    },
}
