//! Error types for SigV4 signing.
//!
//! All signing failures are represented by [`SigningError`]. Every variant is
//! raised before any hashing takes place, so a failed call has no partial
//! result and retrying with the same inputs fails the same way.

/// Errors that can occur while signing a request with AWS Signature Version 4.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The endpoint is not a parsable absolute URI with a host.
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The endpoint as supplied by the caller.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required signing input (method, region, service, payload hash) is empty.
    #[error("Missing required signing input: {0}")]
    MissingField(&'static str),

    /// The HTTP method is not a valid token.
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// The access key or secret key is empty.
    #[error("Access key and secret key must both be non-empty")]
    EmptyCredentials,

    /// No credentials could be resolved from the configured source.
    #[error("No credentials found: {0}")]
    MissingCredentials(String),

    /// The keyed-hash algorithm is not implemented (only HMAC-SHA256 is).
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A computed header value cannot be carried in an HTTP header.
    #[error("Invalid value for header {0}")]
    InvalidHeaderValue(String),
}

impl SigningError {
    /// Whether this error is an input-validation failure, as opposed to a
    /// request for an unsupported algorithm.
    #[must_use]
    pub fn is_input_validation(&self) -> bool {
        !matches!(self, Self::UnsupportedAlgorithm(_))
    }
}
