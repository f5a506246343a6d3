//! `PutObject` request construction.

use std::fmt;
use std::str::FromStr;

use awshttp_auth::{Credentials, SignableRequest, Signer, hash_payload};
use awshttp_core::AwsRegion;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoint::object_url;
use crate::error::S3Error;
use crate::validation::{validate_bucket_name, validate_object_key};

/// Header carrying the hex SHA-256 of the body.
pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";

/// Header selecting the storage class of the new object.
pub const X_AMZ_STORAGE_CLASS: &str = "x-amz-storage-class";

/// S3 storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageClass {
    /// Frequently accessed data; what S3 uses when no class is sent.
    #[default]
    #[serde(rename = "STANDARD")]
    Standard,
    /// Non-critical, reproducible data stored with less redundancy.
    #[serde(rename = "REDUCED_REDUNDANCY")]
    ReducedRedundancy,
    /// Infrequently accessed data, stored across availability zones.
    #[serde(rename = "STANDARD_IA")]
    StandardIa,
    /// Infrequently accessed data, stored in a single availability zone.
    #[serde(rename = "ONEZONE_IA")]
    OnezoneIa,
    /// Data moved between access tiers as its access pattern changes.
    #[serde(rename = "INTELLIGENT_TIERING")]
    IntelligentTiering,
    /// Archive data retrieved within minutes to hours.
    #[serde(rename = "GLACIER")]
    Glacier,
    /// Long-term archive data retrieved within hours.
    #[serde(rename = "DEEP_ARCHIVE")]
    DeepArchive,
}

impl StorageClass {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::ReducedRedundancy => "REDUCED_REDUNDANCY",
            Self::StandardIa => "STANDARD_IA",
            Self::OnezoneIa => "ONEZONE_IA",
            Self::IntelligentTiering => "INTELLIGENT_TIERING",
            Self::Glacier => "GLACIER",
            Self::DeepArchive => "DEEP_ARCHIVE",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = S3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STANDARD" => Ok(Self::Standard),
            "REDUCED_REDUNDANCY" => Ok(Self::ReducedRedundancy),
            "STANDARD_IA" => Ok(Self::StandardIa),
            "ONEZONE_IA" => Ok(Self::OnezoneIa),
            "INTELLIGENT_TIERING" => Ok(Self::IntelligentTiering),
            "GLACIER" => Ok(Self::Glacier),
            "DEEP_ARCHIVE" => Ok(Self::DeepArchive),
            _ => Err(S3Error::UnknownStorageClass(s.to_owned())),
        }
    }
}

/// An object upload, ready to be turned into a signed HTTP request.
#[derive(Debug, Clone)]
pub struct PutObjectRequest {
    /// Target bucket.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Object content.
    pub body: Bytes,
    /// Storage class; omitted from the request when `None`.
    pub storage_class: Option<StorageClass>,
    /// `Content-Type` of the object.
    pub content_type: Option<String>,
}

impl PutObjectRequest {
    /// Upload `body` to `bucket`/`key`.
    #[must_use]
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            body: body.into(),
            storage_class: None,
            content_type: None,
        }
    }

    /// Set the storage class.
    #[must_use]
    pub fn with_storage_class(mut self, storage_class: StorageClass) -> Self {
        self.storage_class = Some(storage_class);
        self
    }

    /// Set the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The headers describing the body, before signing.
    #[must_use]
    pub fn content_headers(&self, payload_hash: &str) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (X_AMZ_CONTENT_SHA256, payload_hash.to_owned()),
            ("content-length", self.body.len().to_string()),
        ];
        if let Some(storage_class) = self.storage_class {
            headers.push((X_AMZ_STORAGE_CLASS, storage_class.as_str().to_owned()));
        }
        if let Some(content_type) = &self.content_type {
            headers.push(("content-type", content_type.clone()));
        }
        headers
    }

    /// Build the signed `PUT` request for the signer's region.
    ///
    /// The returned request carries the content headers, `x-amz-date`, `Host`
    /// and `Authorization`, and owns the body.
    ///
    /// # Errors
    ///
    /// Returns [`S3Error::InvalidBucketName`] or [`S3Error::InvalidKey`] before
    /// any hashing, or the signing or request-assembly error.
    pub fn build_signed(
        &self,
        signer: &Signer,
        credentials: &Credentials,
        endpoint_override: Option<&str>,
    ) -> Result<http::Request<Bytes>, S3Error> {
        validate_bucket_name(&self.bucket)?;
        validate_object_key(&self.key)?;

        let region = AwsRegion::new(signer.region());
        let url = object_url(&region, &self.bucket, &self.key, endpoint_override);

        let payload_hash = hash_payload(&self.body);
        let content_headers = self.content_headers(&payload_hash);

        let signable = SignableRequest::new(http::Method::PUT.as_str(), &url)?
            .with_headers(content_headers.iter().map(|(k, v)| (*k, v.clone())));
        let signed = signer.sign(&signable, &payload_hash, credentials)?;

        let mut builder = http::Request::builder()
            .method(http::Method::PUT)
            .uri(signable.endpoint().clone());
        for (name, value) in &content_headers {
            builder = builder.header(*name, value.as_str());
        }
        let mut request = builder.body(self.body.clone())?;
        signed.apply_to(request.headers_mut())?;

        debug!(
            bucket = %self.bucket,
            key = %self.key,
            size = self.body.len(),
            host = %signed.host,
            "Built signed PutObject request"
        );

        Ok(request)
    }
}
