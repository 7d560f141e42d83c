//! Citadel session client
//!
//! Each public operation is one signed POST:
//! serialize → sign → send through the injected transport → branch on
//! status → map the body. Nothing is retried or cached, and the client
//! holds no per-call state, so one instance can be shared across threads.

use std::fmt;
use std::sync::Arc;

use citadel_domain::config::validate_base_url;
use citadel_domain::constants::{
    CONTENT_TYPE_JSON, SDK_VERSION, SDK_VERSION_HEADER, SESSION_RESOLVE_BEARER_PATH,
    SESSION_RESOLVE_PATH, SESSION_REVOKE_PATH, SIGNATURE_HEADER,
};
use citadel_domain::{
    CitadelError, ClientConfig, ResolveSessionResponse, Result, SessionResolveBearerRequest,
    SessionResolveBearerResponse, SessionResolveRequest, SessionRevokeRequest,
    SessionRevokeResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::mapping::{
    map_resolve_bearer_response, map_resolve_response, map_revoke_response, parse_json_body,
};
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::signing::RequestSigner;

/// Operations offered by the Citadel session API.
///
/// Implemented by [`CitadelHttpClient`]; depend on the trait to swap in a
/// fake in application tests.
pub trait CitadelClient: Send + Sync {
    /// Resolve the session referenced by a cookie header.
    fn session_resolve(&self, request: &SessionResolveRequest) -> Result<ResolveSessionResponse>;

    /// Revoke the session referenced by a cookie header.
    fn session_revoke(&self, request: &SessionRevokeRequest) -> Result<SessionRevokeResponse>;

    /// Resolve the session behind a bearer token.
    fn session_resolve_bearer(
        &self,
        request: &SessionResolveBearerRequest,
    ) -> Result<SessionResolveBearerResponse>;
}

/// Error body the server sends with HTTP 400
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    error_id: String,
    error: String,
}

/// Signed HTTP client for the Citadel session API
#[derive(Clone)]
pub struct CitadelHttpClient {
    base_url: String,
    signer: RequestSigner,
    transport: Arc<dyn HttpTransport>,
}

impl CitadelHttpClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Citadel API; a trailing `/` is dropped
    /// * `pre_shared_key` - Secret used to sign request bodies
    /// * `transport` - Capability that performs the HTTP round trip
    ///
    /// # Errors
    ///
    /// Returns `CitadelError::Config` if the base URL is not an http(s) URL
    /// or the key is empty
    pub fn new(
        base_url: impl Into<String>,
        pre_shared_key: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        let signer = RequestSigner::new(pre_shared_key)?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), signer, transport })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> CitadelHttpClientBuilder {
        CitadelHttpClientBuilder::default()
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a session from the caller's `Cookie` header.
    ///
    /// # Errors
    ///
    /// See [`CitadelError`]; every failure kind can occur here.
    pub fn resolve_session(
        &self,
        cookie_header: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<ResolveSessionResponse> {
        self.session_resolve(&SessionResolveRequest::new(cookie_header, client_id, client_secret))
    }

    /// Revoke the session referenced by the caller's `Cookie` header.
    ///
    /// # Errors
    ///
    /// See [`CitadelError`]; every failure kind can occur here.
    pub fn revoke_session(
        &self,
        cookie_header: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<SessionRevokeResponse> {
        self.session_revoke(&SessionRevokeRequest::new(cookie_header, client_id, client_secret))
    }

    /// Resolve a session from a bearer token.
    ///
    /// # Errors
    ///
    /// See [`CitadelError`]; every failure kind can occur here.
    pub fn resolve_bearer(&self, token: &str) -> Result<SessionResolveBearerResponse> {
        self.session_resolve_bearer(&SessionResolveBearerRequest::new(token))
    }

    /// Serialize, sign and send `request`, returning the decoded success body.
    #[instrument(skip(self, request), fields(path = %path))]
    fn execute<T: Serialize>(&self, path: &'static str, request: &T) -> Result<Value> {
        let body = serde_json::to_vec(request)
            .map_err(|e| CitadelError::Serialization(format!("Failed to serialize body: {e}")))?;
        let http_request = self.build_request(path, body);

        debug!(url = %http_request.url, "POST request");
        let response = self.transport.send(http_request)?;
        debug!(status = response.status, "received response");

        if !response.is_success() {
            return Err(Self::map_status_error(&response));
        }

        // A success without a body carries no session and no headers.
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        parse_json_body(&response.body)
    }

    /// Build the outbound request; the signature covers exactly `body`.
    fn build_request(&self, path: &str, body: Vec<u8>) -> HttpRequest {
        let signature = self.signer.sign(&body);
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                (SDK_VERSION_HEADER.to_string(), SDK_VERSION.to_string()),
                (SIGNATURE_HEADER.to_string(), signature),
            ],
            body,
        }
    }

    fn map_status_error(response: &HttpResponse) -> CitadelError {
        if response.status == 400 {
            if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&response.body) {
                return CitadelError::Api { error_id: body.error_id, error: body.error };
            }
        }
        CitadelError::UnexpectedStatus { status: response.status, body: response.body_text() }
    }
}

impl CitadelClient for CitadelHttpClient {
    fn session_resolve(&self, request: &SessionResolveRequest) -> Result<ResolveSessionResponse> {
        let body = self.execute(SESSION_RESOLVE_PATH, request)?;
        map_resolve_response(&body)
    }

    fn session_revoke(&self, request: &SessionRevokeRequest) -> Result<SessionRevokeResponse> {
        let body = self.execute(SESSION_REVOKE_PATH, request)?;
        map_revoke_response(&body)
    }

    fn session_resolve_bearer(
        &self,
        request: &SessionResolveBearerRequest,
    ) -> Result<SessionResolveBearerResponse> {
        let body = self.execute(SESSION_RESOLVE_BEARER_PATH, request)?;
        map_resolve_bearer_response(&body)
    }
}

impl fmt::Debug for CitadelHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CitadelHttpClient")
            .field("base_url", &self.base_url)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CitadelHttpClient`]
#[derive(Default)]
pub struct CitadelHttpClientBuilder {
    base_url: Option<String>,
    pre_shared_key: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl CitadelHttpClientBuilder {
    /// Set the base URL of the Citadel API
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request-signing secret
    #[must_use]
    pub fn pre_shared_key(mut self, key: impl Into<String>) -> Self {
        self.pre_shared_key = Some(key.into());
        self
    }

    /// Take base URL and key from a [`ClientConfig`]
    #[must_use]
    pub fn config(self, config: &ClientConfig) -> Self {
        self.base_url(config.base_url.clone()).pre_shared_key(config.pre_shared_key.clone())
    }

    /// Set the transport that performs the HTTP round trip
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `CitadelError::Config` if a field is missing or invalid
    pub fn build(self) -> Result<CitadelHttpClient> {
        let base_url =
            self.base_url.ok_or_else(|| CitadelError::Config("Base URL not set".to_string()))?;
        let key = self
            .pre_shared_key
            .ok_or_else(|| CitadelError::Config("Pre-shared key not set".to_string()))?;
        let transport =
            self.transport.ok_or_else(|| CitadelError::Config("Transport not set".to_string()))?;

        CitadelHttpClient::new(base_url, &key, transport)
    }
}
