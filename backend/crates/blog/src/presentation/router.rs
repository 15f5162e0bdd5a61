//! Blog Routers
//!
//! Three routers: posts (nested under /api), comments (nested under
//! /api/comments), and feeds (mounted at the app root).

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgUserRepository;
use auth::presentation::middleware::{AuthGateState, require_identity, resolve_identity};
use platform::media::{HttpMediaHost, MediaStore};

use crate::application::config::SiteConfig;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState, CommentsState, FeedsState};

/// Create the posts router with PostgreSQL repositories
pub fn posts_router(
    repo: PgBlogRepository,
    media: HttpMediaHost,
    user_repo: PgUserRepository,
    auth_config: AuthConfig,
) -> Router {
    posts_router_generic(repo, media, user_repo, auth_config)
}

/// Create a generic posts router for any repository implementations
pub fn posts_router_generic<R, M, U>(
    repo: R,
    media: M,
    user_repo: U,
    auth_config: AuthConfig,
) -> Router
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = BlogAppState {
        repo: Arc::new(repo),
        media: Arc::new(media),
    };

    let gate = AuthGateState::new(Arc::new(user_repo), Arc::new(auth_config));

    // Author-only mutations and admin-scoped reads sit behind the gate;
    // everything else resolves identity without requiring it.
    let gated = Router::new()
        .route("/post", post(handlers::create_post::<R, M>))
        .route(
            "/post/{id}",
            put(handlers::update_post::<R, M>).delete(handlers::delete_post::<R, M>),
        )
        .route("/admin/posts", get(handlers::get_admin_posts::<R, M>))
        .route("/admin/post/{id}", get(handlers::get_post_by_id::<R, M>))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_identity::<U>,
        ));

    Router::new()
        .route(
            "/posts",
            get(handlers::get_all_posts::<R, M>).delete(handlers::delete_all_posts::<R, M>),
        )
        .route("/posts/stats", get(handlers::get_post_stats::<R, M>))
        .route("/posts/trending", get(handlers::get_trending::<R, M>))
        .route(
            "/posts/refresh-trending",
            post(handlers::refresh_trending::<R, M>),
        )
        .route("/post/{id}", get(handlers::get_post_by_id::<R, M>))
        .merge(gated)
        .layer(middleware::from_fn_with_state(gate, resolve_identity::<U>))
        .with_state(state)
}

/// Create the comments router with the PostgreSQL repository
pub fn comments_router(repo: PgBlogRepository) -> Router {
    comments_router_generic(repo)
}

/// Create a generic comments router
pub fn comments_router_generic<C>(repo: C) -> Router
where
    C: CommentRepository + Clone + Send + Sync + 'static,
{
    let state = CommentsState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/{postId}",
            post(handlers::make_comment::<C>).get(handlers::get_comments::<C>),
        )
        .with_state(state)
}

/// Create the feeds router with the PostgreSQL repository
pub fn feeds_router(repo: PgBlogRepository, site: SiteConfig) -> Router {
    feeds_router_generic(repo, site)
}

/// Create a generic feeds router
pub fn feeds_router_generic<R>(repo: R, site: SiteConfig) -> Router
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let state = FeedsState {
        repo: Arc::new(repo),
        site: Arc::new(site),
    };

    Router::new()
        .route("/sitemap.xml", get(handlers::sitemap::<R>))
        .route("/rss.xml", get(handlers::rss_feed::<R>))
        .with_state(state)
}
