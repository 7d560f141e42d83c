//! Request DTOs
//!
//! Serialized verbatim as the JSON request body. Field names on the wire
//! are camelCase. `Debug` never prints client secrets or bearer tokens.

use std::fmt;

use serde::Serialize;

/// Body of `POST /sessions.resolve`
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResolveRequest {
    /// Raw `Cookie` header of the incoming request
    pub cookie_header: String,
    /// Calling application's client id
    pub client_id: String,
    /// Calling application's client secret
    pub client_secret: String,
}

impl SessionResolveRequest {
    /// Bundle the request fields.
    pub fn new(
        cookie_header: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            cookie_header: cookie_header.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Body of `POST /sessions.revoke`
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRevokeRequest {
    /// Raw `Cookie` header of the incoming request
    pub cookie_header: String,
    /// Calling application's client id
    pub client_id: String,
    /// Calling application's client secret
    pub client_secret: String,
}

impl SessionRevokeRequest {
    /// Bundle the request fields.
    pub fn new(
        cookie_header: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            cookie_header: cookie_header.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Body of `POST /sessions.resolveBearer`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SessionResolveBearerRequest {
    /// Bearer token taken from `Authorization`
    pub token: String,
}

impl SessionResolveBearerRequest {
    /// Bundle the request fields.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl fmt::Debug for SessionResolveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionResolveRequest")
            .field("cookie_header", &self.cookie_header)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SessionRevokeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRevokeRequest")
            .field("cookie_header", &self.cookie_header)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SessionResolveBearerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionResolveBearerRequest").field("token", &"<redacted>").finish()
    }
}
