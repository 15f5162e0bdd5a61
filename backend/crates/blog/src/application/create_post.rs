//! Create Post Use Case
//!
//! Creates a new post owned by the calling user. An attached image is
//! uploaded to the media host before the record is written; a failed
//! upload aborts the whole operation.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::{MediaStore, UploadedFile};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Create post input
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Optional image received with the form
    pub image: Option<UploadedFile>,
}

/// Create post use case
pub struct CreatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaStore,
{
    post_repo: Arc<P>,
    media: Arc<M>,
}

impl<P, M> CreatePostUseCase<P, M>
where
    P: PostRepository,
    M: MediaStore,
{
    pub fn new(post_repo: Arc<P>, media: Arc<M>) -> Self {
        Self { post_repo, media }
    }

    pub async fn execute(
        &self,
        author: Option<UserId>,
        input: CreatePostInput,
    ) -> BlogResult<Post> {
        let author = author.ok_or(BlogError::NotLoggedIn)?;

        if input.title.trim().is_empty()
            || input.content.trim().is_empty()
            || input.category.trim().is_empty()
        {
            return Err(BlogError::Validation(
                "Title, content, and category are required".to_string(),
            ));
        }

        // The image goes to the media host first; nothing is persisted if
        // the upload fails.
        let image_url = match &input.image {
            Some(file) => Some(self.media.upload(file).await?),
            None => None,
        };

        let post = Post::new(
            input.title,
            input.content,
            author,
            input.category,
            input.tags,
            image_url,
        );

        self.post_repo.create(&post).await?;

        tracing::info!(post_id = %post.post_id, author_id = %author, "Post created");

        Ok(post)
    }
}
