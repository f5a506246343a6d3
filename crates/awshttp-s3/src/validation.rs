//! Validation for bucket names and object keys.
//!
//! Only the rules that would otherwise produce an unparsable endpoint or a
//! request S3 is certain to reject are checked here.

use crate::error::S3Error;

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Validate an S3 bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
///
/// # Errors
///
/// Returns [`S3Error::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use awshttp_s3::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("examplebucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), S3Error> {
    let invalid = |reason: &str| S3Error::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&name.len()) {
        return Err(invalid(&format!(
            "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(invalid(
            "Bucket name must only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    let alnum = |b: Option<u8>| b.is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    if !alnum(name.bytes().next()) || !alnum(name.bytes().last()) {
        return Err(invalid(
            "Bucket name must begin and end with a letter or number",
        ));
    }

    if name.contains("..") {
        return Err(invalid("Bucket name must not contain consecutive dots"));
    }

    Ok(())
}

/// Validate an S3 object key.
///
/// # Errors
///
/// Returns [`S3Error::InvalidKey`] if the key is empty or longer than 1024 bytes.
pub fn validate_object_key(key: &str) -> Result<(), S3Error> {
    if key.is_empty() {
        return Err(S3Error::InvalidKey("object key must not be empty".to_owned()));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(S3Error::InvalidKey(format!(
            "object key must be at most {MAX_KEY_BYTES} bytes, got {}",
            key.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_accept_valid_bucket_names() {
        assert!(validate_bucket_name("examplebucket").is_ok());
        assert!(validate_bucket_name("my.bucket-01").is_ok());
    }

    #[test]
    fn test_should_reject_invalid_bucket_names() {
        assert!(validate_bucket_name("").is_err());
        assert!(validate_bucket_name("ab").is_err());
        assert!(validate_bucket_name("Example").is_err());
        assert!(validate_bucket_name("-bucket").is_err());
        assert!(validate_bucket_name("bucket.").is_err());
        assert!(validate_bucket_name("my..bucket").is_err());
        assert!(validate_bucket_name("my bucket").is_err());
    }

    #[test]
    fn test_should_validate_object_keys() {
        assert!(validate_object_key("ExampleObject.txt").is_ok());
        assert!(matches!(validate_object_key(""), Err(S3Error::InvalidKey(_))));
        assert!(matches!(
            validate_object_key(&"k".repeat(1025)),
            Err(S3Error::InvalidKey(_))
        ));
    }
}
