//! Time sources for signing.
//!
//! The signer reads its [`Clock`] exactly once per request, so the
//! `x-amz-date` header and the credential scope date always come from the
//! same instant.

use std::fmt::Debug;

use chrono::{DateTime, NaiveDateTime, Utc};

/// A source of the current UTC instant.
pub trait Clock: Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and reproducible signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freeze the clock at an ISO 8601 basic timestamp such as `20130524T000000Z`.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `timestamp` is not in `YYYYMMDDTHHMMSSZ` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use awshttp_auth::clock::{Clock, FixedClock};
    ///
    /// let clock = FixedClock::from_amz_date("20130524T000000Z").unwrap();
    /// assert_eq!(clock.now().format("%Y-%m-%d").to_string(), "2013-05-24");
    /// ```
    pub fn from_amz_date(timestamp: &str) -> Result<Self, chrono::ParseError> {
        let naive = NaiveDateTime::parse_from_str(timestamp, "%Y%m%dT%H%M%SZ")?;
        Ok(Self(naive.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_return_same_instant_from_fixed_clock() {
        let clock = FixedClock::from_amz_date("20150830T123600Z").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().format("%Y%m%dT%H%M%SZ").to_string(), "20150830T123600Z");
    }

    #[test]
    fn test_should_reject_malformed_amz_date() {
        assert!(FixedClock::from_amz_date("2015-08-30T12:36:00Z").is_err());
    }
}
