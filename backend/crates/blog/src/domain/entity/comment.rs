//! Comment Entity
//!
//! Comments are created by any caller under a free-text display name and
//! are never updated or deleted. The post reference is intentionally soft:
//! it is not enforced as a foreign key.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};

/// Comment entity
#[derive(Debug, Clone)]
pub struct Comment {
    /// Internal UUID identifier
    pub comment_id: CommentId,
    /// Commented post
    pub post_id: PostId,
    /// Display name supplied by the caller (not tied to a user account)
    pub user_name: String,
    /// Comment body (non-empty)
    pub text: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment
    pub fn new(post_id: PostId, user_name: String, text: String) -> Self {
        Self {
            comment_id: CommentId::new(),
            post_id,
            user_name,
            text,
            created_at: Utc::now(),
        }
    }
}
