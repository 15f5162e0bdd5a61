//! Register Use Case
//!
//! Creates a new user account, uploading the avatar (if any) before the
//! user record is written.

use std::sync::Arc;

use platform::media::{MediaStore, UploadedFile};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Optional avatar image received with the form
    pub avatar: Option<UploadedFile>,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R, M>
where
    R: UserRepository,
    M: MediaStore,
{
    user_repo: Arc<R>,
    media: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: UserRepository,
    M: MediaStore,
{
    pub fn new(user_repo: Arc<R>, media: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            media,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if input.username.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(AuthError::Validation("All fields are required".to_string()));
        }

        let username =
            Username::new(input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Avatar goes to the media host first; a failed upload aborts the
        // registration and no user record is written.
        let avatar_url = match &input.avatar {
            Some(file) => Some(self.media.upload(file).await?),
            None => None,
        };

        let user = User::new(username, email, password_hash, avatar_url);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput { user })
    }
}
