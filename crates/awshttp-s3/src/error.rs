//! Error types for building S3 requests.

use awshttp_auth::SigningError;

/// Errors that can occur while building a signed S3 request.
#[derive(Debug, thiserror::Error)]
pub enum S3Error {
    /// The bucket name is not valid.
    #[error("Invalid bucket name {name:?}: {reason}")]
    InvalidBucketName {
        /// The rejected bucket name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The object key is not valid.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// The storage class is not recognized.
    #[error("Unknown storage class: {0}")]
    UnknownStorageClass(String),

    /// Signing failed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The HTTP request could not be assembled.
    #[error(transparent)]
    Http(#[from] http::Error),
}
