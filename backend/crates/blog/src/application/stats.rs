//! Post Statistics Use Case
//!
//! Aggregate counts for admin dashboards: total posts, posts per
//! category, posts per author.

use std::sync::Arc;

use crate::domain::repository::{AuthorCount, CategoryCount, PostRepository};
use crate::error::BlogResult;

/// Post statistics
#[derive(Debug, Clone)]
pub struct PostStats {
    pub total_posts: i64,
    pub posts_by_category: Vec<CategoryCount>,
    pub posts_by_author: Vec<AuthorCount>,
}

/// Stats use case
pub struct StatsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> StatsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self) -> BlogResult<PostStats> {
        let total_posts = self.post_repo.count().await?;
        let posts_by_category = self.post_repo.count_by_category().await?;
        let posts_by_author = self.post_repo.count_by_author().await?;

        Ok(PostStats {
            total_posts,
            posts_by_category,
            posts_by_author,
        })
    }
}
