//! Update Post Use Case
//!
//! Applies a partial update to a post. The post is fetched before the
//! ownership check so a missing post reads as NotFound rather than
//! Forbidden; only the author may update. The author field itself is
//! immutable.

use std::sync::Arc;

use kernel::id::{PostId, UserId};
use platform::media::{MediaStore, UploadedFile};

use crate::domain::entity::post::{Post, PostPatch};
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Update post input: any subset of content fields plus an optional
/// replacement image
#[derive(Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<UploadedFile>,
}

/// Update post use case
pub struct UpdatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaStore,
{
    post_repo: Arc<P>,
    media: Arc<M>,
}

impl<P, M> UpdatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaStore,
{
    pub fn new(post_repo: Arc<P>, media: Arc<M>) -> Self {
        Self { post_repo, media }
    }

    pub async fn execute(
        &self,
        caller: Option<UserId>,
        post_id: &PostId,
        input: UpdatePostInput,
    ) -> BlogResult<Post> {
        let caller = caller.ok_or(BlogError::NotLoggedIn)?;

        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if !post.is_authored_by(&caller) {
            return Err(BlogError::NotOwner("update"));
        }

        let field_patch = input.title.is_some()
            || input.content.is_some()
            || input.category.is_some()
            || input.tags.is_some();

        if !field_patch && input.image.is_none() {
            return Err(BlogError::Validation(
                "Request body is empty or malformed. Please ensure you're sending data"
                    .to_string(),
            ));
        }

        // Replacement image is uploaded before the row changes; a failure
        // here leaves the post untouched.
        let image_url = match &input.image {
            Some(file) => Some(self.media.upload(file).await?),
            None => None,
        };

        post.apply(PostPatch {
            title: input.title,
            content: input.content,
            category: input.category,
            tags: input.tags,
            image_url,
        });

        self.post_repo.update(&post).await?;

        tracing::info!(post_id = %post.post_id, "Post updated");

        Ok(post)
    }
}
