//! Wire-level constants
//!
//! Centralized location for every string the client puts on the wire.

// SDK identification
pub const SDK_VERSION: &str = "0.3.2-rust";
pub const SDK_VERSION_HEADER: &str = "x-sdk-version";

// Request signing
pub const SIGNATURE_HEADER: &str = "x-citadel-sig";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// Endpoint paths, appended to the configured base URL
pub const SESSION_RESOLVE_PATH: &str = "/sessions.resolve";
pub const SESSION_REVOKE_PATH: &str = "/sessions.revoke";
pub const SESSION_RESOLVE_BEARER_PATH: &str = "/sessions.resolveBearer";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
