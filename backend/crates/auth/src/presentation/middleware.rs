//! Auth Middleware
//!
//! Resolves the caller's identity from the access token for protected
//! routes, and optionally for routes where anonymity matters (the view
//! counter only runs for anonymous reads).

use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::id::UserId;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Identity resolved from a verified access token
///
/// Inserted into request extensions by the middlewares below and read by
/// downstream handlers. Use cases receive it as an explicit parameter.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Optional identity for routes that serve both anonymous and logged-in
/// callers
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// Pull the access token from the cookie or the Authorization header
fn extract_access_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    if let Some(token) = extract_cookie(headers, &config.access_cookie_name) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

/// Resolve the caller's identity, or fail
///
/// Fails with `TokenMissing` (no token anywhere), `TokenInvalid` (bad
/// signature, malformed, expired), or `UserGone` (token verifies but the
/// user record no longer exists).
async fn resolve<R>(state: &AuthGateState<R>, headers: &HeaderMap) -> AuthResult<CurrentUser>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token =
        extract_access_token(headers, &state.config).ok_or(AuthError::TokenMissing)?;

    let issuer = TokenIssuer::new(state.config.clone());
    let claims = issuer.verify_access_token(&token)?;

    let user_id = UserId::parse(&claims.id).map_err(|_| AuthError::TokenInvalid)?;

    let user = state
        .repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::UserGone)?;

    Ok(CurrentUser {
        id: user.user_id,
        username: user.username.as_str().to_string(),
        email: user.email.as_str().to_string(),
    })
}

/// Middleware that requires a resolved identity
///
/// Rejects the request before any handler (and thus any mutation) runs.
pub async fn require_identity<R>(
    axum::extract::State(state): axum::extract::State<AuthGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    match resolve(&state, req.headers()).await {
        Ok(user) => {
            req.extensions_mut().insert(MaybeUser(Some(user.clone())));
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Middleware that resolves identity but doesn't require it
///
/// Handlers read `MaybeUser` from extensions; anonymous callers get `None`.
pub async fn resolve_identity<R>(
    axum::extract::State(state): axum::extract::State<AuthGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = resolve(&state, req.headers()).await.ok();
    req.extensions_mut().insert(MaybeUser(user));
    next.run(req).await
}
