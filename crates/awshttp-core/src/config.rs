//! Configuration management for awshttp.
//!
//! All configuration is driven by environment variables.

use crate::error::AwsHttpError;
use crate::types::AwsRegion;

/// Global configuration for awshttp tooling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsHttpConfig {
    /// Region used for signing and endpoint selection.
    pub default_region: AwsRegion,
    /// Log level.
    pub log_level: String,
    /// Target bucket for object uploads.
    pub bucket: Option<String>,
    /// Base URL replacing the computed regional S3 endpoint (e.g. a local emulator).
    pub endpoint_url: Option<String>,
}

impl Default for AwsHttpConfig {
    fn default() -> Self {
        Self {
            default_region: AwsRegion::default(),
            log_level: "info".to_owned(),
            bucket: None,
            endpoint_url: None,
        }
    }
}

impl AwsHttpConfig {
    /// Load configuration from environment variables.
    ///
    /// `AWS_REGION` takes precedence over `DEFAULT_REGION`.
    ///
    /// # Errors
    /// Returns [`AwsHttpError::InvalidRegion`] if the configured region is malformed.
    pub fn from_env() -> Result<Self, AwsHttpError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`AwsHttpError::InvalidRegion`] if the configured region is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AwsHttpError> {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("DEFAULT_REGION")) {
            config.default_region = AwsRegion::parse(v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("S3_BUCKET") {
            config.bucket = Some(v).filter(|b| !b.is_empty());
        }
        if let Some(v) = lookup("S3_ENDPOINT_URL") {
            config.endpoint_url = Some(v.trim_end_matches('/').to_owned()).filter(|u| !u.is_empty());
        }

        Ok(config)
    }

    /// The configured bucket.
    ///
    /// # Errors
    /// Returns [`AwsHttpError::Config`] if no bucket was configured.
    pub fn require_bucket(&self) -> Result<&str, AwsHttpError> {
        self.bucket
            .as_deref()
            .ok_or_else(|| AwsHttpError::Config("S3_BUCKET is not set".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_should_create_default_config() {
        let config = AwsHttpConfig::default();
        assert_eq!(config.default_region.as_str(), "us-east-1");
        assert_eq!(config.log_level, "info");
        assert!(config.bucket.is_none());
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_should_prefer_aws_region_over_default_region() {
        let config = AwsHttpConfig::from_lookup(lookup_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("DEFAULT_REGION", "ap-southeast-2"),
        ]))
        .unwrap();
        assert_eq!(config.default_region.as_str(), "eu-west-1");
    }

    #[test]
    fn test_should_trim_trailing_slash_from_endpoint_url() {
        let config = AwsHttpConfig::from_lookup(lookup_from(&[(
            "S3_ENDPOINT_URL",
            "http://localhost:4566/",
        )]))
        .unwrap();
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_should_reject_malformed_region() {
        let result = AwsHttpConfig::from_lookup(lookup_from(&[("AWS_REGION", "Not A Region")]));
        assert!(matches!(result, Err(AwsHttpError::InvalidRegion(_))));
    }

    #[test]
    fn test_should_require_bucket() {
        let config = AwsHttpConfig::from_lookup(lookup_from(&[("S3_BUCKET", "")])).unwrap();
        assert!(matches!(config.require_bucket(), Err(AwsHttpError::Config(_))));

        let config = AwsHttpConfig::from_lookup(lookup_from(&[("S3_BUCKET", "photos")])).unwrap();
        assert_eq!(config.require_bucket().unwrap(), "photos");
    }

    #[test]
    fn test_should_serialize_config_in_camel_case() {
        let json = serde_json::to_value(AwsHttpConfig::default()).unwrap();
        assert_eq!(json["defaultRegion"], "us-east-1");
        assert_eq!(json["logLevel"], "info");
    }
}
