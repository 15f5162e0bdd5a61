//! Delete Post Use Cases
//!
//! Author-only single delete, plus the unrestricted delete-all used by
//! admin tooling.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Delete post use case
pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Delete one post; only the author may do this. The deleted post is
    /// returned so the response can echo it.
    pub async fn execute(&self, caller: Option<UserId>, post_id: &PostId) -> BlogResult<Post> {
        let caller = caller.ok_or(BlogError::NotLoggedIn)?;

        // Fetch before the ownership check: a missing post is NotFound,
        // not Forbidden.
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if !post.is_authored_by(&caller) {
            return Err(BlogError::NotOwner("delete"));
        }

        self.post_repo.delete(post_id).await?;

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(post)
    }

    /// Delete every post unconditionally, returning the count
    pub async fn execute_all(&self) -> BlogResult<u64> {
        let deleted = self.post_repo.delete_all().await?;

        if deleted == 0 {
            return Err(BlogError::NothingToDelete);
        }

        tracing::warn!(deleted = deleted, "All posts deleted");

        Ok(deleted)
    }
}
