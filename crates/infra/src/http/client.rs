use std::time::Duration;

use citadel_core::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use citadel_domain::constants::DEFAULT_TIMEOUT_SECS;
use citadel_domain::{CitadelError, Result};
use reqwest::blocking::Client as ReqwestClient;
use reqwest::redirect::Policy;
use reqwest::Method;
use tracing::debug;

use crate::errors::InfraError;

/// Blocking HTTP transport backed by reqwest.
///
/// Sends each request exactly once and never follows redirects, so a 3xx
/// reaches the caller as-is. Timeouts and connection failures come back as
/// `CitadelError::Transport`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Wrap an already configured reqwest client.
    ///
    /// The client's own redirect and retry settings apply; use
    /// [`ReqwestTransport::builder`] to get the no-redirect default.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Post => Method::POST,
        };
        debug!(%method, url = %request.url, bytes = request.body.len(), "sending HTTP request");

        let mut builder = self.client.request(method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.body(request.body).send().map_err(into_citadel)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.bytes().map_err(into_citadel)?.to_vec();

        debug!(%method, url = %request.url, status, "received HTTP response");
        Ok(HttpResponse { status, headers, body })
    }
}

fn into_citadel(err: reqwest::Error) -> CitadelError {
    InfraError::from(err).into()
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    use_system_proxy: bool,
    accept_invalid_certs: bool,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            use_system_proxy: false,
            accept_invalid_certs: false,
        }
    }
}

impl ReqwestTransportBuilder {
    /// Total per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header for every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers added to every request.
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment (off by default).
    pub fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `CitadelError::Config` if reqwest cannot initialise its client.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).redirect(Policy::none());

        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| {
            CitadelError::Config(format!("Failed to build HTTP transport: {err}"))
        })?;

        Ok(ReqwestTransport { client })
    }
}
