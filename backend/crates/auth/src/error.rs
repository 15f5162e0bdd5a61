//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found (unknown email on login, or token subject gone)
    #[error("User not found or invalid email")]
    UserNotFound,

    /// Email already registered
    #[error("User already exists with this email")]
    EmailTaken,

    /// Username already registered
    #[error("User already exists with this username")]
    UsernameTaken,

    /// Wrong password on login
    #[error("Invalid password")]
    InvalidPassword,

    /// No token on a protected route
    #[error("Access token is required")]
    TokenMissing,

    /// Token malformed, signature invalid, or expired
    #[error("Invalid access token")]
    TokenInvalid,

    /// Token verifies but the referenced user no longer exists
    #[error("Invalid access token")]
    UserGone,

    /// Refresh token does not match the stored one
    #[error("Refresh token is no longer valid")]
    RefreshTokenMismatch,

    /// Input validation error (missing or malformed field)
    #[error("{0}")]
    Validation(String),

    /// Media host failure during avatar upload
    #[error("Failed to upload file: {0}")]
    Upload(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken | AuthError::UsernameTaken | AuthError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidPassword
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::UserGone
            | AuthError::RefreshTokenMismatch => StatusCode::UNAUTHORIZED,
            AuthError::Upload(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken | AuthError::UsernameTaken | AuthError::Validation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidPassword
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::UserGone
            | AuthError::RefreshTokenMismatch => ErrorKind::Unauthorized,
            AuthError::Upload(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures surface a generic message; the detail only
    /// goes to the log.
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            AppError::new(self.kind(), "Internal Server Error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Upload(msg) => {
                tracing::error!(message = %msg, "Avatar upload failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RefreshTokenMismatch => {
                tracing::warn!("Stale refresh token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::media::MediaError> for AuthError {
    fn from(err: platform::media::MediaError) -> Self {
        match &err {
            platform::media::MediaError::UnsupportedType(_)
            | platform::media::MediaError::TooLarge { .. } => {
                AuthError::Validation(err.to_string())
            }
            platform::media::MediaError::UploadFailed(_) => AuthError::Upload(err.to_string()),
        }
    }
}
