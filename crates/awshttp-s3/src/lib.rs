//! Signed S3 object upload requests for awshttp.
//!
//! This crate builds the outbound `PutObject` request: it picks the regional
//! endpoint, hashes the body, sets the content headers, and signs the result
//! with [`awshttp_auth::Signer`]. Sending the request is left to the caller.

pub mod endpoint;
pub mod error;
pub mod put_object;
pub mod validation;

pub use endpoint::{object_url, s3_endpoint_host};
pub use error::S3Error;
pub use put_object::{PutObjectRequest, StorageClass};
