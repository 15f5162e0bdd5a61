//! List Posts Use Case
//!
//! Filtered, sorted, paginated listing. An empty page of results is an
//! error (NotFound) by policy, never a valid empty 200. This covers both
//! an empty collection and a page past the last one.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::query::PostQuery;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// List posts use case
pub struct ListPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Public listing
    pub async fn execute(&self, query: PostQuery) -> BlogResult<Vec<Post>> {
        let posts = self.post_repo.query(&query).await?;

        if posts.is_empty() {
            return Err(BlogError::NoMatches);
        }

        Ok(posts)
    }

    /// Admin-scoped listing: the author filter is forced to the caller, so
    /// a user only ever sees their own posts here.
    pub async fn execute_admin(
        &self,
        caller: Option<UserId>,
        query: PostQuery,
    ) -> BlogResult<Vec<Post>> {
        let caller = caller.ok_or(BlogError::NotLoggedIn)?;
        self.execute(query.for_author(caller)).await
    }
}
