//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::stats::PostStats;
use crate::domain::entity::{comment::Comment, post::Post};

// ============================================================================
// Posts
// ============================================================================

/// Raw listing parameters as they arrive on the query string
///
/// `page` and `limit` stay strings here; folding bad values back to the
/// defaults happens in the domain query model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Public post representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_trending: bool,
    pub views: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.post_id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author_id.to_string(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            is_trending: post.is_trending,
            views: post.views,
            image: post.image_url.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Delete-all response payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub deleted_count: u64,
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCountResponse {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCountResponse {
    pub author: String,
    pub count: i64,
}

/// Post statistics payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_posts: i64,
    pub posts_by_category: Vec<CategoryCountResponse>,
    pub posts_by_author: Vec<AuthorCountResponse>,
}

impl From<&PostStats> for StatsResponse {
    fn from(stats: &PostStats) -> Self {
        Self {
            total_posts: stats.total_posts,
            posts_by_category: stats
                .posts_by_category
                .iter()
                .map(|c| CategoryCountResponse {
                    category: c.category.clone(),
                    count: c.count,
                })
                .collect(),
            posts_by_author: stats
                .posts_by_author
                .iter()
                .map(|a| AuthorCountResponse {
                    author: a.author_id.to_string(),
                    count: a.count,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
}

/// Public comment representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id.to_string(),
            post_id: comment.post_id.to_string(),
            user_name: comment.user_name.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}
