//! Sending signed requests.

use bytes::Bytes;
use http::{Method, StatusCode};
use tracing::{debug, warn};

/// Errors raised while sending a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Only `GET`, `POST`, `PUT` and `DELETE` are sent.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    /// The service answered with a non-2xx status.
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, usually an XML error document.
        body: String,
    },

    /// Connection, TLS or body read failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Send `request` and return the response body text on a 2xx status.
pub async fn send(
    client: &reqwest::Client,
    request: http::Request<Bytes>,
) -> Result<String, TransportError> {
    check_method(request.method())?;
    let method = request.method().clone();
    let uri = request.uri().to_string();

    let request = reqwest::Request::try_from(request)?;
    let response = client.execute(request).await?;
    let status = response.status();
    let body = response.text().await?;

    debug!(%method, %uri, status = status.as_u16(), "Received response");
    into_result(status, body)
}

fn check_method(method: &Method) -> Result<(), TransportError> {
    if [Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(method) {
        Ok(())
    } else {
        Err(TransportError::UnsupportedMethod(method.clone()))
    }
}

fn into_result(status: StatusCode, body: String) -> Result<String, TransportError> {
    if status.is_success() {
        Ok(body)
    } else {
        warn!(status = status.as_u16(), "Request rejected");
        Err(TransportError::Status { status, body })
    }
}
