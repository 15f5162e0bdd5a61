//! Blog (Posts & Comments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, the post query model, trending selection,
//!   repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Filtered, sorted, paginated post listing
//! - Post CRUD with author-only mutation
//! - Anonymous-read view counting
//! - Trending recompute (top 10 by views)
//! - Comments (create + list, never edited or deleted)
//! - Sitemap / RSS feed rendering

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SiteConfig;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::{comments_router, feeds_router, posts_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::query::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
