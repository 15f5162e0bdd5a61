//! Get Post Use Case
//!
//! Single-post read with the view-counter side effect: an anonymous read
//! increments the stored count by one and persists it before the response;
//! any logged-in viewer leaves the count untouched.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Get post use case
pub struct GetPostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> GetPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, viewer: Option<UserId>, post_id: &PostId) -> BlogResult<Post> {
        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if viewer.is_none() {
            post.record_view();
            self.post_repo.update(&post).await?;
        }

        Ok(post)
    }
}
