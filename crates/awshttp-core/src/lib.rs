//! Core types, configuration, and error handling for awshttp.
//!
//! This crate provides the building blocks shared by the signing, S3, and
//! binary crates: the [`AwsRegion`] identifier with its endpoint addressing
//! rules, environment-driven configuration, and the core error type.

mod config;
mod error;
mod types;

pub use config::AwsHttpConfig;
pub use error::AwsHttpError;
pub use types::AwsRegion;
