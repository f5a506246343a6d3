//! Memoization of derived signing keys.
//!
//! A signing key depends only on (secret key, date, region, service), so
//! requests sharing all four can reuse one derivation. [`SigningKeyCache`]
//! keys entries by a SHA-256 digest of the secret rather than the secret
//! itself, and entries for different secrets never collide.

use std::fmt;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::config::{HmacAlgorithm, SigningConfig};
use crate::sigv4::{SigningKey, derive_key};

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    secret_digest: [u8; 32],
    algorithm: HmacAlgorithm,
    date: String,
    region: String,
    service: String,
}

/// Thread-safe cache of derived signing keys.
///
/// The natural key space is one entry per secret, calendar day, region and
/// service, so there is no eviction; [`SigningKeyCache::retain_date`] drops
/// entries for past days.
///
/// # Examples
///
/// ```
/// use awshttp_auth::config::SigningConfig;
/// use awshttp_auth::key_cache::SigningKeyCache;
/// use awshttp_auth::sigv4::derive_signing_key;
///
/// let cache = SigningKeyCache::new();
/// let config = SigningConfig::default();
/// let key = cache.get_or_derive(&config, "secret", "20130524", "us-east-1", "s3");
/// assert_eq!(key, derive_signing_key("secret", "20130524", "us-east-1", "s3"));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Default)]
pub struct SigningKeyCache {
    inner: DashMap<CacheKey, SigningKey>,
}

impl SigningKeyCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Return the cached signing key, deriving and storing it on a miss.
    #[must_use]
    pub fn get_or_derive(
        &self,
        config: &SigningConfig,
        secret_key: &str,
        date: &str,
        region: &str,
        service: &str,
    ) -> SigningKey {
        let mut secret_digest = [0u8; 32];
        secret_digest.copy_from_slice(Sha256::digest(secret_key.as_bytes()).as_slice());

        let key = CacheKey {
            secret_digest,
            algorithm: config.algorithm(),
            date: date.to_owned(),
            region: region.to_owned(),
            service: service.to_owned(),
        };

        *self.inner.entry(key).or_insert_with(|| {
            trace!(date, region, service, "deriving signing key");
            derive_key(config, secret_key, date, region, service)
        })
    }

    /// Drop every entry whose scope date is not `date`.
    pub fn retain_date(&self, date: &str) {
        self.inner.retain(|key, _| key.date == date);
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SigningKeyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyCache")
            .field("len", &self.inner.len())
            .finish_non_exhaustive()
    }
}
