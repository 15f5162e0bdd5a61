//! Trending Use Case
//!
//! Full recompute of the trending set plus retrieval of the currently
//! flagged posts. The recompute marks the new top posts but does not clear
//! flags on posts that fell out of the selection.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::trending::select_trending;
use crate::error::{BlogError, BlogResult};

/// Trending use case
pub struct TrendingUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> TrendingUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Recompute the trending set: top 10 by views, marked and persisted,
    /// returned sorted by views descending
    pub async fn refresh(&self, caller: Option<UserId>) -> BlogResult<Vec<Post>> {
        if caller.is_none() {
            return Err(BlogError::NotLoggedIn);
        }

        let posts = self.post_repo.list_all().await?;
        let mut selected = select_trending(posts);

        for post in &mut selected {
            post.mark_trending();
            self.post_repo.update(post).await?;
        }

        tracing::info!(marked = selected.len(), "Trending posts refreshed");

        Ok(selected)
    }

    /// Read the currently flagged posts, independent of rank order
    pub async fn current(&self, caller: Option<UserId>) -> BlogResult<Vec<Post>> {
        if caller.is_none() {
            return Err(BlogError::NotLoggedIn);
        }

        let posts = self.post_repo.find_trending().await?;

        if posts.is_empty() {
            return Err(BlogError::NoTrending);
        }

        Ok(posts)
    }
}
