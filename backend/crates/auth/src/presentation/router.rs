//! User Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::media::{HttpMediaHost, MediaStore};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_identity};

/// Create the user router with PostgreSQL repository
pub fn user_router(repo: PgUserRepository, media: HttpMediaHost, config: AuthConfig) -> Router {
    user_router_generic(repo, media, config)
}

/// Create a generic user router for any repository/media implementation
pub fn user_router_generic<R, M>(repo: R, media: M, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let state = AuthAppState {
        repo: repo.clone(),
        media: Arc::new(media),
        config: config.clone(),
    };

    let gate = AuthGateState::new(repo, config);

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/refresh-token", get(handlers::refresh_token::<R, M>))
        .merge(
            Router::new()
                .route("/logout", get(handlers::logout::<R, M>))
                .route_layer(middleware::from_fn_with_state(
                    gate,
                    require_identity::<R>,
                )),
        )
        .with_state(state)
}
