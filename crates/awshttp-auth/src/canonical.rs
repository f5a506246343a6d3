//! Canonical request construction for AWS Signature Version 4.
//!
//! This module implements the SigV4 canonical request format:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! where `CanonicalHeaders` is itself newline-terminated per header, which is
//! what produces the blank line before `SignedHeaders`.
//!
//! Every function here is pure. The header functions accept headers in any
//! insertion order and any name case; their output depends only on the set of
//! (lowercased name, value) pairs.

use std::collections::BTreeMap;

use http::Uri;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};

/// Characters left unencoded in query parameter names and values: the RFC 3986
/// unreserved set (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`). Everything else is encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters left unencoded inside a single path segment: the unreserved set
/// plus `:`, `?`, `=` and `&`. Segments are joined back with literal `/`.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &URI_ENCODE_SET
    .remove(b':')
    .remove(b'?')
    .remove(b'=')
    .remove(b'&');

/// Build the signed headers string: lowercase header names, sorted, joined by `;`.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_header_names;
///
/// assert_eq!(
///     canonical_header_names(&[("X-Amz-Date", "20130524T000000Z"), ("Host", "example.com")]),
///     "host;x-amz-date"
/// );
/// assert_eq!(canonical_header_names(&[]), "");
/// ```
#[must_use]
pub fn canonical_header_names(headers: &[(&str, &str)]) -> String {
    normalize_headers(headers)
        .into_keys()
        .collect::<Vec<_>>()
        .join(";")
}

/// Build the canonical headers block.
///
/// Each header becomes `lowercased-name:value\n`, sorted by lowercased name.
/// Values are trimmed and runs of whitespace are collapsed to a single space,
/// in both names and values. Headers whose names differ only by case are
/// merged into one entry with their values joined by `,`.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_header_block;
///
/// let block = canonical_header_block(&[
///     ("X-Amz-Meta-Note", "  a   b  "),
///     ("Host", "example.com"),
/// ]);
/// assert_eq!(block, "host:example.com\nx-amz-meta-note:a b\n");
/// ```
#[must_use]
pub fn canonical_header_block(headers: &[(&str, &str)]) -> String {
    normalize_headers(headers)
        .into_iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect()
}

/// Build the canonical URI from the path component of `endpoint`.
///
/// An absent path becomes `/`. Each segment is percent-decoded first and then
/// re-encoded, so already-encoded input is never double-encoded.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_resource_path;
///
/// let uri = "https://examplebucket.s3.amazonaws.com/test$file.text".parse().unwrap();
/// assert_eq!(canonical_resource_path(&uri), "/test%24file.text");
///
/// let uri = "https://s3.amazonaws.com".parse().unwrap();
/// assert_eq!(canonical_resource_path(&uri), "/");
/// ```
#[must_use]
pub fn canonical_resource_path(endpoint: &Uri) -> String {
    let path = endpoint.path();
    if path.is_empty() || path == "/" {
        return "/".to_owned();
    }

    let encoded = path
        .split('/')
        .map(|segment| {
            let decoded: Vec<u8> = percent_decode(segment.as_bytes()).collect();
            percent_encode(&decoded, PATH_SEGMENT_ENCODE_SET).to_string()
        })
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{encoded}")
    }
}

/// Build the canonical query string from raw (unencoded) parameters.
///
/// Names and values are percent-encoded first and the pairs are then sorted by
/// encoded name, then encoded value. Sorting after encoding matters: encoding
/// can change the relative order of two names.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_query_string;
///
/// assert_eq!(canonical_query_string(&[]), "");
/// assert_eq!(
///     canonical_query_string(&[("prefix", "J"), ("max-keys", "2")]),
///     "max-keys=2&prefix=J"
/// );
/// assert_eq!(canonical_query_string(&[("key", "a b")]), "key=a%20b");
/// ```
#[must_use]
pub fn canonical_query_string(params: &[(&str, &str)]) -> String {
    let params: Vec<(&[u8], &[u8])> = params
        .iter()
        .map(|(name, value)| (name.as_bytes(), value.as_bytes()))
        .collect();
    canonical_query_string_bytes(&params)
}

/// [`canonical_query_string`] over raw bytes.
///
/// Decoded query components need not be UTF-8 (`%FF` decodes to the single
/// byte `0xFF`); each byte is encoded back exactly as it was received.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_query_string_bytes;
///
/// assert_eq!(canonical_query_string_bytes(&[(&b"k"[..], &[0xFF_u8][..])]), "k=%FF");
/// ```
#[must_use]
pub fn canonical_query_string_bytes(params: &[(&[u8], &[u8])]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (uri_encode(name), uri_encode(value)))
        .collect();

    encoded.sort_unstable();

    encoded
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Assemble the canonical request from its already-canonical parts.
///
/// `header_block` is expected to be newline-terminated, as returned by
/// [`canonical_header_block`]. An empty `query` still occupies its own line.
///
/// # Examples
///
/// ```
/// use awshttp_auth::canonical::canonical_request;
///
/// let canonical = canonical_request(
///     "GET",
///     "/test.txt",
///     "",
///     "host:examplebucket.s3.amazonaws.com\n",
///     "host",
///     "UNSIGNED-PAYLOAD",
/// );
/// assert_eq!(
///     canonical,
///     "GET\n/test.txt\n\nhost:examplebucket.s3.amazonaws.com\n\nhost\nUNSIGNED-PAYLOAD"
/// );
/// ```
#[must_use]
pub fn canonical_request(
    method: &str,
    path: &str,
    query: &str,
    header_block: &str,
    header_names: &str,
    body_hash: &str,
) -> String {
    format!("{method}\n{path}\n{query}\n{header_block}\n{header_names}\n{body_hash}")
}

/// Lowercase, whitespace-normalize and sort headers.
///
/// Both [`canonical_header_names`] and [`canonical_header_block`] go through
/// this, which keeps their orderings identical.
fn normalize_headers(headers: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut header_map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let lower_name = collapse_whitespace(name.trim()).to_lowercase();
        let trimmed_value = collapse_whitespace(value.trim());
        header_map
            .entry(lower_name)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&trimmed_value);
            })
            .or_insert(trimmed_value);
    }
    header_map
}

/// Percent-encode a query parameter name or value.
fn uri_encode(input: &[u8]) -> String {
    percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Collapse consecutive whitespace characters in a string to a single space.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result
}
