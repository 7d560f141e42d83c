//! Response DTOs
//!
//! `session` is `None` when the credential did not resolve to a session.
//! That is a normal outcome, distinct from a malformed response.

use serde::Serialize;

use super::recommended::{MultiValueHeaders, Recommended};
use super::session::ResolvedSession;

/// Result of `POST /sessions.resolve`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSessionResponse {
    /// Resolved session, `None` when the credential matched none
    pub session: Option<ResolvedSession>,
    /// How to answer the original request
    pub recommended: Recommended,
}

/// Alternate name for [`ResolveSessionResponse`].
pub type SessionResolveResponse = ResolveSessionResponse;

/// Result of `POST /sessions.revoke`: headers the caller should apply to
/// its own response (usually cookie-clearing `Set-Cookie` values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRevokeResponse {
    /// Headers to apply to the downstream response
    pub response_headers: MultiValueHeaders,
}

/// Result of `POST /sessions.resolveBearer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResolveBearerResponse {
    /// Resolved session, `None` when the credential matched none
    pub session: Option<ResolvedSession>,
}
