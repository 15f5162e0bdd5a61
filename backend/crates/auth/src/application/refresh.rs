//! Refresh Use Case
//!
//! Exchanges a valid refresh token for a fresh token pair. The presented
//! token must be the one currently stored on the user record; a rotated or
//! cleared token is rejected, which is what invalidates old sessions.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh output
pub struct RefreshOutput {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    issuer: TokenIssuer,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            issuer: TokenIssuer::new(config),
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self.issuer.verify_refresh_token(refresh_token)?;

        let user_id = UserId::parse(&claims.id).map_err(|_| AuthError::TokenInvalid)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_current_refresh_token(refresh_token) {
            return Err(AuthError::RefreshTokenMismatch);
        }

        let access_token = self.issuer.issue_access_token(&user)?;
        let new_refresh_token = self.issuer.issue_refresh_token(&user)?;

        let mut user = user;
        user.rotate_refresh_token(new_refresh_token.clone());
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Tokens refreshed");

        Ok(RefreshOutput {
            user,
            access_token,
            refresh_token: new_refresh_token,
        })
    }
}
