//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::errors::{CitadelError, Result};

/// Settings needed to talk to a Citadel deployment.
///
/// `base_url` and `pre_shared_key` are fixed for the lifetime of a client;
/// the remaining fields only tune the default transport.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Citadel API (e.g., "https://citadel.internal")
    pub base_url: String,
    /// Shared secret used to sign every request body
    pub pre_shared_key: String,
    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional `User-Agent` for the default transport
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Create a configuration with the default timeout and no user agent.
    pub fn new(base_url: impl Into<String>, pre_shared_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            pre_shared_key: pre_shared_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Transport timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the configuration can produce a working client.
    ///
    /// # Errors
    /// Returns `CitadelError::Config` if the key is empty, the base URL does
    /// not parse or is not http(s), or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)?;
        if self.pre_shared_key.is_empty() {
            return Err(CitadelError::Config("pre-shared key must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CitadelError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Parse a base URL and require an http or https scheme.
///
/// # Errors
/// Returns `CitadelError::Config` describing why the URL was rejected.
pub fn validate_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| CitadelError::Config(format!("Invalid base URL '{base_url}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CitadelError::Config(format!("Unsupported base URL scheme: {other}"))),
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("pre_shared_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
