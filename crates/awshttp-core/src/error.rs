//! Error types for the awshttp core.

/// Core error type for awshttp infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum AwsHttpError {
    /// Invalid AWS region identifier.
    #[error("invalid AWS region: {0:?} (expected lowercase letters, digits and dashes)")]
    InvalidRegion(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

}
