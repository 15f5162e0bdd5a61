//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::PostId;
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::query::PostQuery;
use crate::error::BlogResult;

/// Per-category post count (stats)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Per-author post count (stats)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub author_id: Uuid,
    pub count: i64,
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post
    async fn create(&self, post: &Post) -> BlogResult<()>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>>;

    /// Update post (content patch, view count, trending flag)
    async fn update(&self, post: &Post) -> BlogResult<()>;

    /// Delete a post
    async fn delete(&self, post_id: &PostId) -> BlogResult<()>;

    /// Delete every post, returning how many were removed
    async fn delete_all(&self) -> BlogResult<u64>;

    /// Filtered, sorted, paginated listing
    async fn query(&self, query: &PostQuery) -> BlogResult<Vec<Post>>;

    /// All posts in storage order (trending recompute, sitemap)
    async fn list_all(&self) -> BlogResult<Vec<Post>>;

    /// Newest posts by creation time (RSS)
    async fn list_recent(&self, limit: i64) -> BlogResult<Vec<Post>>;

    /// Posts currently flagged as trending, independent of rank order
    async fn find_trending(&self) -> BlogResult<Vec<Post>>;

    /// Total post count (stats)
    async fn count(&self) -> BlogResult<i64>;

    /// Post counts grouped by category (stats)
    async fn count_by_category(&self) -> BlogResult<Vec<CategoryCount>>;

    /// Post counts grouped by author (stats)
    async fn count_by_author(&self) -> BlogResult<Vec<AuthorCount>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a new comment
    async fn create(&self, comment: &Comment) -> BlogResult<()>;

    /// All comments for a post, newest first
    async fn list_for_post(&self, post_id: &PostId) -> BlogResult<Vec<Comment>>;
}
