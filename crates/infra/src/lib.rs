//! # Citadel Infrastructure
//!
//! Concrete adapters for the ports in `citadel-core`.
//!
//! This crate contains:
//! - A blocking reqwest implementation of `HttpTransport`
//! - Configuration loading from the environment or JSON/TOML files
//! - Conversions from third-party errors into `CitadelError`
//! - A factory that wires all of the above into a `CitadelHttpClient`

pub mod config;
pub mod errors;
pub mod factory;
pub mod http;

pub use errors::InfraError;
pub use factory::{build_client, load_client};
pub use http::{ReqwestTransport, ReqwestTransportBuilder};
