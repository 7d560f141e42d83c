//! Domain types and models
//!
//! Everything here is produced by the response mapper or handed to the
//! request pipeline; none of it carries behavior beyond field access.

pub mod recommended;
pub mod requests;
pub mod responses;
pub mod session;

// Re-export for convenience
pub use recommended::{MultiValueHeaders, Recommended};
pub use requests::{SessionResolveBearerRequest, SessionResolveRequest, SessionRevokeRequest};
pub use responses::{
    ResolveSessionResponse, SessionResolveBearerResponse, SessionResolveResponse,
    SessionRevokeResponse,
};
pub use session::{ClaimValue, ResolvedIdentity, ResolvedSession, ResolvedValue};
