//! Blog Error Types
//!
//! This module provides blog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Operation needs a logged-in caller but none was supplied
    #[error("User is not logged in")]
    NotLoggedIn,

    /// Post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// The filtered page of results is empty
    #[error("No posts found matching the criteria")]
    NoMatches,

    /// No post carries the trending flag
    #[error("No trending posts found")]
    NoTrending,

    /// Delete-all found nothing to remove
    #[error("No posts found to delete")]
    NothingToDelete,

    /// Caller is not the post's author ("update" / "delete")
    #[error("You are not authorized to {0} this post")]
    NotOwner(&'static str),

    /// Input validation error (missing or malformed field)
    #[error("{0}")]
    Validation(String),

    /// Media host failure during image upload
    #[error("Failed to upload file: {0}")]
    Upload(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::NotLoggedIn | BlogError::Validation(_) => StatusCode::BAD_REQUEST,
            BlogError::NotOwner(_) => StatusCode::FORBIDDEN,
            BlogError::PostNotFound
            | BlogError::NoMatches
            | BlogError::NoTrending
            | BlogError::NothingToDelete => StatusCode::NOT_FOUND,
            BlogError::Upload(_) | BlogError::Database(_) | BlogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::NotLoggedIn | BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::NotOwner(_) => ErrorKind::Forbidden,
            BlogError::PostNotFound
            | BlogError::NoMatches
            | BlogError::NoTrending
            | BlogError::NothingToDelete => ErrorKind::NotFound,
            BlogError::Upload(_) | BlogError::Database(_) | BlogError::Internal(_) => {
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
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Upload(msg) => {
                tracing::error!(message = %msg, "Image upload failed");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::NotOwner(action) => {
                tracing::warn!(action = %action, "Rejected mutation by non-author");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        BlogError::Internal(err.to_string())
    }
}

impl From<platform::media::MediaError> for BlogError {
    fn from(err: platform::media::MediaError) -> Self {
        match &err {
            platform::media::MediaError::UnsupportedType(_)
            | platform::media::MediaError::TooLarge { .. } => {
                BlogError::Validation(err.to_string())
            }
            platform::media::MediaError::UploadFailed(_) => BlogError::Upload(err.to_string()),
        }
    }
}
