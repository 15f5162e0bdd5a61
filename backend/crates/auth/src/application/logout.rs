//! Logout Use Case
//!
//! Ends the account's session by clearing the stored refresh token.
//! Already-issued access tokens stay valid until their own expiry.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.clear_refresh_token();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
