//! Wiring of configuration, transport, and client

use std::sync::Arc;

use citadel_core::CitadelHttpClient;
use citadel_domain::{ClientConfig, Result};
use tracing::instrument;

use crate::config;
use crate::http::ReqwestTransport;

/// Build a client backed by [`ReqwestTransport`].
///
/// Timeout and user agent come from `config`; the configuration is validated
/// before anything is constructed.
///
/// # Errors
/// Returns `CitadelError::Config` for invalid settings or if the HTTP stack
/// cannot be initialised.
#[instrument(skip(config), fields(base_url = %config.base_url))]
pub fn build_client(config: &ClientConfig) -> Result<CitadelHttpClient> {
    config.validate()?;

    let mut transport = ReqwestTransport::builder().timeout(config.timeout());
    if let Some(agent) = &config.user_agent {
        transport = transport.user_agent(agent.clone());
    }

    CitadelHttpClient::builder().config(config).transport(Arc::new(transport.build()?)).build()
}

/// Load configuration (environment, then file) and build a client from it.
///
/// # Errors
/// Propagates loader and [`build_client`] errors.
pub fn load_client() -> Result<CitadelHttpClient> {
    build_client(&config::load()?)
}

#[cfg(test)]
mod tests {
    use citadel_domain::CitadelError;

    use super::*;

    #[test]
    fn builds_client_and_normalizes_base_url() {
        let config = ClientConfig::new("https://citadel.example.com/", "psk")
            .with_timeout_secs(3)
            .with_user_agent("gateway/1.0");

        let client = build_client(&config).unwrap();
        assert_eq!(client.base_url(), "https://citadel.example.com");
    }

    #[test]
    fn rejects_invalid_config() {
        let empty_key = ClientConfig::new("https://citadel.example.com", "");
        assert!(matches!(build_client(&empty_key), Err(CitadelError::Config(_))));

        let zero_timeout = ClientConfig::new("https://citadel.example.com", "psk").with_timeout_secs(0);
        assert!(matches!(build_client(&zero_timeout), Err(CitadelError::Config(_))));

        let bad_url = ClientConfig::new("not a url", "psk");
        assert!(matches!(build_client(&bad_url), Err(CitadelError::Config(_))));
    }
}
