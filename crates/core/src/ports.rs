//! Transport port interfaces
//!
//! The pipeline never talks HTTP itself. Embedding applications inject an
//! [`HttpTransport`]; `citadel-infra` ships one backed by reqwest.

use std::fmt;

use citadel_domain::Result;

/// HTTP method of an outbound request.
///
/// Every Citadel endpoint is a `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully prepared outbound request.
///
/// `body` holds the exact bytes that were signed; transports must send it
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// Header name/value pairs in send order
    pub headers: Vec<(String, String)>,
    /// Serialized, signed body
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// First header value with the given name (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Raw response as received from the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers as received
    pub headers: Vec<(String, String)>,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with the given name (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Synchronous send capability the pipeline depends on.
///
/// One call is one round trip. Implementations report network, TLS and
/// timeout failures as `CitadelError::Transport` and return every HTTP
/// status, including errors, as an `Ok(HttpResponse)`.
pub trait HttpTransport: Send + Sync {
    /// Send `request` and wait for the complete response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
