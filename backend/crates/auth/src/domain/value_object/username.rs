//! Username Value Object
//!
//! ユーザー名は、ユーザーを識別するための公開ハンドル。
//! ログイン画面の表示、投稿の著者表記、管理運用に使用される。
//!
//! ## 不変条件
//! - 長さ: 3〜20文字
//! - 使用可能文字: 英数字とアンダースコアのみ（`[A-Za-z0-9_]`）
//! - 前後の空白は除去してから検証する

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 20;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    /// Username is empty after trimming
    #[error("Username is required")]
    Empty,

    /// Username is too short
    #[error("Username must be at least {min} characters")]
    TooShort { length: usize, min: usize },

    /// Username is too long
    #[error("Username must be under {max} characters")]
    TooLong { length: usize, max: usize },

    /// Username contains a character outside `[A-Za-z0-9_]`
    #[error("Username can only contain letters, numbers, and underscores")]
    InvalidCharacter { char: char, position: usize },
}

// ============================================================================
// Value Object
// ============================================================================

/// Validated username handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let trimmed = raw.into().trim().to_string();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = trimmed.chars().count();

        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }

        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        for (position, char) in trimmed.chars().enumerate() {
            if !(char.is_ascii_alphanumeric() || char == '_') {
                return Err(UsernameError::InvalidCharacter { char, position });
            }
        }

        Ok(Self(trimmed))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::new("abc").is_ok());
        assert!(Username::new("user_123").is_ok());
        assert!(Username::new("A_B_C").is_ok());
        assert!(Username::new("x".repeat(20)).is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let name = Username::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Username::new("   ").unwrap_err(), UsernameError::Empty);
    }

    #[test]
    fn test_rejects_length_bounds() {
        assert!(matches!(
            Username::new("ab").unwrap_err(),
            UsernameError::TooShort { length: 2, min: 3 }
        ));
        assert!(matches!(
            Username::new("x".repeat(21)).unwrap_err(),
            UsernameError::TooLong { length: 21, max: 20 }
        ));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        assert!(matches!(
            Username::new("user-name").unwrap_err(),
            UsernameError::InvalidCharacter { char: '-', .. }
        ));
        assert!(matches!(
            Username::new("user name").unwrap_err(),
            UsernameError::InvalidCharacter { char: ' ', .. }
        ));
        assert!(matches!(
            Username::new("usér").unwrap_err(),
            UsernameError::InvalidCharacter { char: 'é', .. }
        ));
    }
}
