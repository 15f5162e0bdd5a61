//! Comment Use Cases
//!
//! Creation and listing. Unlike posts, an empty comment list is a valid
//! 200 response, not an error.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::comment::Comment;
use crate::domain::repository::CommentRepository;
use crate::error::{BlogError, BlogResult};

/// Create comment input
pub struct CreateCommentInput {
    pub user_name: String,
    pub text: String,
}

/// Comment use case
pub struct CommentUseCase<C>
where
    C: CommentRepository,
{
    comment_repo: Arc<C>,
}

impl<C> CommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    /// Create a comment on a post
    ///
    /// No record is written when validation fails. The post reference is
    /// not checked for existence (soft reference by design).
    pub async fn create(
        &self,
        post_id: PostId,
        input: CreateCommentInput,
    ) -> BlogResult<Comment> {
        if input.user_name.trim().is_empty() {
            return Err(BlogError::Validation("User Name is required".to_string()));
        }

        if input.text.trim().is_empty() {
            return Err(BlogError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        let comment = Comment::new(post_id, input.user_name, input.text);
        self.comment_repo.create(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %comment.post_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// List a post's comments, newest first (possibly empty)
    pub async fn list(&self, post_id: &PostId) -> BlogResult<Vec<Comment>> {
        self.comment_repo.list_for_post(post_id).await
    }
}
