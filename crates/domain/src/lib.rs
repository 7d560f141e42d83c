//! # Citadel Domain
//!
//! Value types and errors shared by the Citadel client crates.
//!
//! This crate contains:
//! - Resolved session snapshots (sessions, identities, claim values)
//! - Recommended actions returned by the resolve endpoint
//! - Request and response DTOs for the three session endpoints
//! - The client error taxonomy and Result alias
//! - Wire constants and client configuration
//!
//! ## Architecture
//! - No dependencies on other Citadel crates
//! - No I/O; every type is plain immutable data

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::ClientConfig;
pub use errors::*;
pub use types::*;
