//! Common AWS type definitions shared across crates.

use std::fmt;
use std::str::FromStr;

use crate::error::AwsHttpError;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region. Also the only region served by the global S3 endpoint.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region without validation.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Create a region, rejecting identifiers that cannot appear in a
    /// credential scope or a host name.
    ///
    /// # Errors
    /// Returns [`AwsHttpError::InvalidRegion`] if the identifier is empty or
    /// contains anything other than ASCII lowercase letters, digits and `-`.
    pub fn parse(region: impl Into<String>) -> Result<Self, AwsHttpError> {
        let region = region.into();
        let valid = !region.is_empty()
            && !region.starts_with('-')
            && !region.ends_with('-')
            && region
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AwsHttpError::InvalidRegion(region));
        }
        Ok(Self(region))
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether requests for this region are addressed to the global
    /// (region-less) endpoint rather than a region-qualified host.
    #[must_use]
    pub fn uses_global_endpoint(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AwsRegion {
    type Err = AwsHttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
