//! # Citadel Core
//!
//! Request pipeline for the Citadel session API - no HTTP implementation.
//!
//! This crate contains:
//! - The transport port (`HttpTransport`) the pipeline sends through
//! - Request body signing (HMAC-SHA256, hex encoded)
//! - Mapping of raw JSON responses into domain types
//! - The client itself (`CitadelHttpClient`) and its port (`CitadelClient`)
//!
//! ## Architecture Principles
//! - Only depends on `citadel-domain`
//! - Network I/O happens behind `HttpTransport`, injected at construction
//! - One synchronous round trip per call, no retries, no caching

pub mod client;
pub mod mapping;
pub mod ports;
pub mod signing;

pub use client::{CitadelClient, CitadelHttpClient, CitadelHttpClientBuilder};
pub use mapping::{
    map_resolve_bearer_response, map_resolve_response, map_resolved_session,
    map_revoke_response, parse_timestamp,
};
pub use ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use signing::{sign, RequestSigner};
