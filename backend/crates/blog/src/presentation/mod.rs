//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{BlogAppState, CommentsState, FeedsState};
pub use router::{
    comments_router, comments_router_generic, feeds_router, feeds_router_generic, posts_router,
    posts_router_generic,
};
