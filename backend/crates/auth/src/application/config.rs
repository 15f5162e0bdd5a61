//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret for access tokens
    pub access_token_secret: Vec<u8>,
    /// Signing secret for refresh tokens (independent from access)
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (24 hours)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (10 days)
    pub refresh_token_ttl: Duration,
    /// Cookie carrying the access token
    pub access_cookie_name: String,
    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,
    /// Cookie carrying the logged-in user id
    pub user_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: Vec::new(),
            refresh_token_secret: Vec::new(),
            access_token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            refresh_token_ttl: Duration::from_secs(10 * 24 * 3600), // 10 days
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            user_cookie_name: "loggedUser".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with random signing secrets (for development)
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;

        let mut access = vec![0u8; 32];
        let mut refresh = vec![0u8; 32];
        rand::rng().fill_bytes(&mut access);
        rand::rng().fill_bytes(&mut refresh);

        Self {
            access_token_secret: access,
            refresh_token_secret: refresh,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Access token TTL in whole seconds
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }

    /// Refresh token TTL in whole seconds
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_token_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
