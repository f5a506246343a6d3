//! The request descriptor handed to the signer.

use http::Uri;
use percent_encoding::percent_decode_str;

use crate::error::SigningError;

/// Method, endpoint, headers and query parameters of one outbound request.
///
/// Headers and query parameters keep their insertion order here; the
/// canonical forms computed from them do not depend on it. Query parameters
/// are stored as decoded bytes and encoded once during canonicalization, so
/// escapes that do not decode to UTF-8 survive unchanged.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    method: String,
    endpoint: Uri,
    headers: Vec<(String, String)>,
    query: Vec<(Vec<u8>, Vec<u8>)>,
}

impl SignableRequest {
    /// Describe a request to `endpoint`.
    ///
    /// Any query component of `endpoint` is split into decoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingField`] for an empty method,
    /// [`SigningError::InvalidMethod`] for a method that is not an HTTP token,
    /// or [`SigningError::InvalidEndpoint`] if `endpoint` does not parse as an
    /// absolute URI with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use awshttp_auth::request::SignableRequest;
    ///
    /// let request = SignableRequest::new("GET", "https://examplebucket.s3.amazonaws.com/?max-keys=2")
    ///     .unwrap()
    ///     .with_header("Range", "bytes=0-9");
    /// assert_eq!(request.host_header(), "examplebucket.s3.amazonaws.com");
    /// assert_eq!(request.query(), &[(b"max-keys".to_vec(), b"2".to_vec())]);
    /// ```
    pub fn new(method: impl Into<String>, endpoint: &str) -> Result<Self, SigningError> {
        let uri: Uri = endpoint.parse().map_err(|e: http::uri::InvalidUri| {
            SigningError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: e.to_string(),
            }
        })?;
        Self::from_uri(method, uri)
    }

    /// Describe a request to an already parsed endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`SignableRequest::new`], minus the parse failure.
    pub fn from_uri(method: impl Into<String>, endpoint: Uri) -> Result<Self, SigningError> {
        let method = method.into();
        if method.is_empty() {
            return Err(SigningError::MissingField("method"));
        }
        if http::Method::from_bytes(method.as_bytes()).is_err() {
            return Err(SigningError::InvalidMethod(method));
        }

        if endpoint.scheme().is_none() {
            return Err(invalid_endpoint(&endpoint, "missing scheme"));
        }
        match endpoint.host() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(invalid_endpoint(&endpoint, "missing host")),
        }

        let query = endpoint.query().map(parse_query).unwrap_or_default();

        Ok(Self {
            method,
            endpoint,
            headers: Vec::new(),
            query,
        })
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers.
    #[must_use]
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a raw (unencoded) query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .push((name.into().into_bytes(), value.into().into_bytes()));
        self
    }

    /// The HTTP method, verbatim.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The endpoint URI.
    #[must_use]
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Caller-supplied headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Query parameters, decoded to raw bytes.
    #[must_use]
    pub fn query(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.query
    }

    /// The `Host` header value: the lowercased host name, plus the port when
    /// it is explicit and not the scheme's default.
    #[must_use]
    pub fn host_header(&self) -> String {
        let host = self.endpoint.host().unwrap_or_default().to_ascii_lowercase();
        let default_port = match self.endpoint.scheme_str() {
            Some("http") => Some(80),
            Some("https") => Some(443),
            _ => None,
        };
        match self.endpoint.port_u16() {
            Some(port) if Some(port) != default_port => format!("{host}:{port}"),
            _ => host,
        }
    }
}

fn invalid_endpoint(endpoint: &Uri, reason: &str) -> SigningError {
    SigningError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_owned(),
    }
}

/// Split a raw query string into decoded name/value pairs.
fn parse_query(query: &str) -> Vec<(Vec<u8>, Vec<u8>)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| {
            let (name, value) = param.split_once('=').unwrap_or((param, ""));
            (url_decode(name), url_decode(value))
        })
        .collect()
}

fn url_decode(s: &str) -> Vec<u8> {
    percent_decode_str(s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_reject_unparsable_endpoint() {
        let result = SignableRequest::new("PUT", "https://exa mple.com/key");
        assert!(matches!(result, Err(SigningError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_should_reject_endpoint_without_host() {
        let result = SignableRequest::new("PUT", "/bucket/key");
        assert!(matches!(result, Err(SigningError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_should_reject_empty_method() {
        let result = SignableRequest::new("", "https://s3.amazonaws.com/bucket");
        assert!(matches!(result, Err(SigningError::MissingField("method"))));
    }

    #[test]
    fn test_should_reject_method_with_whitespace() {
        let result = SignableRequest::new("PU T", "https://s3.amazonaws.com/bucket");
        assert!(matches!(result, Err(SigningError::InvalidMethod(_))));
    }

    #[test]
    fn test_should_keep_method_verbatim() {
        let request = SignableRequest::new("put", "https://s3.amazonaws.com/bucket").unwrap();
        assert_eq!(request.method(), "put");
    }

    #[test]
    fn test_should_omit_default_ports_from_host() {
        let https = SignableRequest::new("GET", "https://s3.amazonaws.com:443/").unwrap();
        assert_eq!(https.host_header(), "s3.amazonaws.com");

        let http = SignableRequest::new("GET", "http://s3.amazonaws.com:80/").unwrap();
        assert_eq!(http.host_header(), "s3.amazonaws.com");
    }

    #[test]
    fn test_should_include_non_default_port_in_host() {
        let request = SignableRequest::new("GET", "http://LocalHost:4566/bucket").unwrap();
        assert_eq!(request.host_header(), "localhost:4566");
    }

    #[test]
    fn test_should_decode_endpoint_query_into_parameters() {
        let request =
            SignableRequest::new("GET", "https://s3.amazonaws.com/bucket?prefix=a%20b&acl")
                .unwrap()
                .with_query_param("max-keys", "2");
        assert_eq!(
            request.query(),
            &[
                (b"prefix".to_vec(), b"a b".to_vec()),
                (b"acl".to_vec(), Vec::new()),
                (b"max-keys".to_vec(), b"2".to_vec()),
            ]
        );
    }

    #[test]
    fn test_should_keep_non_utf8_query_bytes() {
        let request =
            SignableRequest::new("GET", "https://examplebucket.s3.amazonaws.com/?k=%FF").unwrap();
        assert_eq!(request.query(), &[(b"k".to_vec(), vec![0xFF])]);
    }
}
