//! Signing constants.
//!
//! [`SigningConfig`] is the immutable record of the names and formats that
//! make up the AWS4 scheme. It is passed by value into a
//! [`Signer`](crate::sigv4::Signer); there is no global state.

use std::fmt;
use std::str::FromStr;

use crate::error::SigningError;

/// Keyed-hash algorithms the signer implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HmacAlgorithm {
    /// HMAC with SHA-256.
    #[default]
    Sha256,
}

impl HmacAlgorithm {
    /// The algorithm name as it appears after the scheme, e.g. `HMAC-SHA256`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "HMAC-SHA256",
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = SigningError;

    /// Accepts `sha256` or `hmac-sha256` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sha256") || s.eq_ignore_ascii_case("hmac-sha256") {
            Ok(Self::Sha256)
        } else {
            Err(SigningError::UnsupportedAlgorithm(s.to_owned()))
        }
    }
}

/// Names and formats of the AWS4 signing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningConfig {
    scheme: &'static str,
    algorithm: HmacAlgorithm,
    terminator: &'static str,
    timestamp_format: &'static str,
    date_format: &'static str,
}

impl SigningConfig {
    /// The standard AWS4-HMAC-SHA256 configuration.
    pub const AWS4_HMAC_SHA256: Self = Self {
        scheme: "AWS4",
        algorithm: HmacAlgorithm::Sha256,
        terminator: "aws4_request",
        timestamp_format: "%Y%m%dT%H%M%SZ",
        date_format: "%Y%m%d",
    };

    /// Build a configuration for the named keyed-hash algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::UnsupportedAlgorithm`] for anything other than
    /// HMAC-SHA256.
    ///
    /// # Examples
    ///
    /// ```
    /// use awshttp_auth::config::SigningConfig;
    ///
    /// let config = SigningConfig::with_algorithm("SHA256").unwrap();
    /// assert_eq!(config.algorithm_id(), "AWS4-HMAC-SHA256");
    /// assert!(SigningConfig::with_algorithm("SHA1").is_err());
    /// ```
    pub fn with_algorithm(name: &str) -> Result<Self, SigningError> {
        let algorithm = name.parse()?;
        Ok(Self {
            algorithm,
            ..Self::AWS4_HMAC_SHA256
        })
    }

    /// The key prefix and algorithm family, `AWS4`.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    /// The keyed-hash algorithm.
    #[must_use]
    pub fn algorithm(&self) -> HmacAlgorithm {
        self.algorithm
    }

    /// The full algorithm identifier, e.g. `AWS4-HMAC-SHA256`.
    #[must_use]
    pub fn algorithm_id(&self) -> String {
        format!("{}-{}", self.scheme, self.algorithm)
    }

    /// The literal that ends every credential scope, `aws4_request`.
    #[must_use]
    pub fn terminator(&self) -> &'static str {
        self.terminator
    }

    /// `strftime` format of the `x-amz-date` timestamp.
    #[must_use]
    pub fn timestamp_format(&self) -> &'static str {
        self.timestamp_format
    }

    /// `strftime` format of the scope date.
    #[must_use]
    pub fn date_format(&self) -> &'static str {
        self.date_format
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self::AWS4_HMAC_SHA256
    }
}
