//! Conversions from external infrastructure errors into domain errors.

use citadel_domain::CitadelError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CitadelError);

impl From<InfraError> for CitadelError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CitadelError> for InfraError {
    fn from(value: CitadelError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CitadelError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        // Builder errors mean the request or client could not be assembled,
        // which only happens with bad configuration.
        if err.is_builder() {
            return InfraError(CitadelError::Config(format!("invalid HTTP request: {err}")));
        }

        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response body: {err}")
        } else {
            err.to_string()
        };

        InfraError(CitadelError::Transport(message))
    }
}
