//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGateState, CurrentUser, MaybeUser, require_identity, resolve_identity};
pub use router::{user_router, user_router_generic};
