//! Token Issuer
//!
//! Issues and verifies the signed access/refresh token pair. Both tokens
//! carry the same identity claims; they differ only in signing secret and
//! lifetime. There is no revocation list: invalidation happens solely by
//! overwriting the refresh token stored on the user record.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Identity claims embedded in every token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (UUID string)
    pub id: String,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies signed tokens
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a short-lived access token for a user
    pub fn issue_access_token(&self, user: &User) -> AuthResult<String> {
        self.issue(
            user,
            &self.config.access_token_secret,
            self.config.access_ttl_secs(),
        )
    }

    /// Issue a longer-lived refresh token for a user
    ///
    /// The caller persists the returned token on the user record, replacing
    /// any previous one (single active session per account).
    pub fn issue_refresh_token(&self, user: &User) -> AuthResult<String> {
        self.issue(
            user,
            &self.config.refresh_token_secret,
            self.config.refresh_ttl_secs(),
        )
    }

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> AuthResult<Claims> {
        Self::verify(token, &self.config.access_token_secret)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<Claims> {
        Self::verify(token, &self.config.refresh_token_secret)
    }

    fn issue(&self, user: &User, secret: &[u8], ttl_secs: i64) -> AuthResult<String> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            id: user.user_id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Signature and expiry check; any failure collapses to `TokenInvalid`
    fn verify(token: &str, secret: &[u8]) -> AuthResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, username::Username};
    use platform::password::ClearTextPassword;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(Arc::new(AuthConfig::with_random_secrets()))
    }

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
    fn test_access_token_roundtrip() {
        let issuer = issuer();
        let user = sample_user();

        let token = issuer.issue_access_token(&user).unwrap();
        let claims = issuer.verify_access_token(&token).unwrap();

        assert_eq!(claims.id, user.user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tokens_use_separate_secrets() {
        let issuer = issuer();
        let user = sample_user();

        let access = issuer.issue_access_token(&user).unwrap();
        let refresh = issuer.issue_refresh_token(&user).unwrap();

        // Cross-verification must fail
        assert!(matches!(
            issuer.verify_access_token(&refresh),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            issuer.verify_refresh_token(&access),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let issuer = issuer();
        assert!(matches!(
            issuer.verify_access_token("not.a.token"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let user = sample_user();

        let mut token = issuer.issue_access_token(&user).unwrap();
        // Flip a character in the signature segment
        let flipped = if token.ends_with('a') { 'b' } else { 'a' };
        token.pop();
        token.push(flipped);

        assert!(matches!(
            issuer.verify_access_token(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = Arc::new(AuthConfig::with_random_secrets());
        let user = sample_user();

        // Hand-craft a token whose expiry is well past the validation leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: user.user_id.to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&config.access_token_secret),
        )
        .unwrap();

        let issuer = TokenIssuer::new(config);
        assert!(matches!(
            issuer.verify_access_token(&token),
            Err(AuthError::TokenInvalid)
        ));
    }
}
