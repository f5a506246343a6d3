//! Region endpoint addressing.
//!
//! `us-east-1` is served by the global endpoint `s3.amazonaws.com`; every
//! other region uses the dash-style regional host `s3-<region>.amazonaws.com`.
//! Objects are addressed path-style: `https://<host>/<bucket>/<key>`.

use awshttp_core::AwsRegion;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters encoded in object key segments when building a URL. Everything
/// outside the unreserved set is encoded, so the URL always parses.
const KEY_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The S3 host serving `region`.
///
/// # Examples
///
/// ```
/// use awshttp_core::AwsRegion;
/// use awshttp_s3::endpoint::s3_endpoint_host;
///
/// assert_eq!(s3_endpoint_host(&AwsRegion::new("us-east-1")), "s3.amazonaws.com");
/// assert_eq!(s3_endpoint_host(&AwsRegion::new("eu-west-1")), "s3-eu-west-1.amazonaws.com");
/// ```
#[must_use]
pub fn s3_endpoint_host(region: &AwsRegion) -> String {
    if region.uses_global_endpoint() {
        "s3.amazonaws.com".to_owned()
    } else {
        format!("s3-{region}.amazonaws.com")
    }
}

/// The path-style URL of `key` in `bucket`.
///
/// `endpoint_override` replaces `https://<regional host>` when set, e.g. to
/// target a local S3 emulator. Slashes in `key` are kept as path separators;
/// each segment is percent-encoded.
///
/// # Examples
///
/// ```
/// use awshttp_core::AwsRegion;
/// use awshttp_s3::endpoint::object_url;
///
/// assert_eq!(
///     object_url(&AwsRegion::default(), "examplebucket", "ExampleObject.txt", None),
///     "https://s3.amazonaws.com/examplebucket/ExampleObject.txt"
/// );
/// assert_eq!(
///     object_url(&AwsRegion::default(), "b", "a dir/file.txt", Some("http://localhost:4566")),
///     "http://localhost:4566/b/a%20dir/file.txt"
/// );
/// ```
#[must_use]
pub fn object_url(
    region: &AwsRegion,
    bucket: &str,
    key: &str,
    endpoint_override: Option<&str>,
) -> String {
    let base = endpoint_override.map_or_else(
        || format!("https://{}", s3_endpoint_host(region)),
        |url| url.trim_end_matches('/').to_owned(),
    );
    let encoded_key = key
        .split('/')
        .map(|segment| utf8_percent_encode(segment, KEY_SEGMENT_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!("{base}/{bucket}/{encoded_key}")
}
