//! User Entity
//!
//! Core account record. The password is only ever held in hashed form.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, username::Username};

/// Default avatar reference used when no file was uploaded at registration
pub const DEFAULT_AVATAR: &str = "default.png";

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Public handle (unique)
    pub username: Username,
    /// Email address (unique, lowercase)
    pub email: Email,
    /// Argon2id hash of the password
    pub password_hash: HashedPassword,
    /// Avatar reference (hosted URL or the default placeholder)
    pub avatar_url: String,
    /// Current refresh token; None when logged out.
    /// Exactly one session per account: login overwrites, logout clears.
    pub refresh_token: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        username: Username,
        email: Email,
        password_hash: HashedPassword,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            password_hash,
            avatar_url: avatar_url.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored refresh token (login / refresh rotation)
    pub fn rotate_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Clear the stored refresh token (logout)
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// Whether a given refresh token is the currently active one
    pub fn is_current_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn sample_user() -> User {
        let password = ClearTextPassword::new("abc12@".to_string()).unwrap();
        User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            password.hash(None).unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert_eq!(user.avatar_url, DEFAULT_AVATAR);
        assert!(user.refresh_token.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_refresh_token_rotation() {
        let mut user = sample_user();

        user.rotate_refresh_token("first".to_string());
        assert!(user.is_current_refresh_token("first"));

        // A second login replaces the previous session
        user.rotate_refresh_token("second".to_string());
        assert!(!user.is_current_refresh_token("first"));
        assert!(user.is_current_refresh_token("second"));

        user.clear_refresh_token();
        assert!(user.refresh_token.is_none());
        assert!(!user.is_current_refresh_token("second"));
    }
}
