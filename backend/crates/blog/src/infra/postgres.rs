//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::query::{PostQuery, SortDirection};
use crate::domain::repository::{
    AuthorCount, CategoryCount, CommentRepository, PostRepository,
};
use crate::error::BlogResult;

const POST_COLUMNS: &str = "post_id, title, content, author_id, category, tags, \
     is_trending, views, image_url, created_at, updated_at";

/// PostgreSQL-backed post + comment repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn create(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                content,
                author_id,
                category,
                tags,
                is_trending,
                views,
                image_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id.as_uuid())
        .bind(&post.category)
        .bind(&post.tags)
        .bind(post.is_trending)
        .bind(post.views)
        .bind(&post.image_url)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                content = $3,
                category = $4,
                tags = $5,
                is_trending = $6,
                views = $7,
                image_url = $8,
                updated_at = $9
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.category)
        .bind(&post.tags)
        .bind(post.is_trending)
        .bind(post.views)
        .bind(&post.image_url)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<()> {
        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all(&self) -> BlogResult<u64> {
        let deleted = sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn query(&self, query: &PostQuery) -> BlogResult<Vec<Post>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE TRUE"
        ));

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR content ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(category) = &query.category {
            qb.push(" AND category ILIKE ")
                .push_bind(format!("%{category}%"));
        }

        if let Some(tag) = &query.tag {
            qb.push(" AND ").push_bind(tag.clone()).push(" = ANY(tags)");
        }

        if let Some(author) = &query.author {
            qb.push(" AND author_id = ").push_bind(*author.as_uuid());
        }

        // Creation-time sort only; equal timestamps keep storage order
        match query.sort {
            SortDirection::Asc => qb.push(" ORDER BY created_at ASC"),
            SortDirection::Desc => qb.push(" ORDER BY created_at DESC"),
        };

        qb.push(" LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(query.offset() as i64);

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn list_all(&self) -> BlogResult<Vec<Post>> {
        let rows =
            sqlx::query_as::<_, PostRow>(&format!("SELECT {POST_COLUMNS} FROM posts"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn list_recent(&self, limit: i64) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_trending(&self) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE is_trending = TRUE"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn count(&self) -> BlogResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_by_category(&self) -> BlogResult<Vec<CategoryCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT category, COUNT(*) FROM posts GROUP BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    async fn count_by_author(&self) -> BlogResult<Vec<AuthorCount>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT author_id, COUNT(*) FROM posts GROUP BY author_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(author_id, count)| AuthorCount { author_id, count })
            .collect())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn create(&self, comment: &Comment) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                user_name,
                text,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(&comment.user_name)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_post(&self, post_id: &PostId) -> BlogResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT comment_id, post_id, user_name, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    category: String,
    tags: Vec<String>,
    is_trending: bool,
    views: i64,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            title: self.title,
            content: self.content,
            author_id: UserId::from_uuid(self.author_id),
            category: self.category,
            tags: self.tags,
            is_trending: self.is_trending,
            views: self.views,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    user_name: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            user_name: self.user_name,
            text: self.text,
            created_at: self.created_at,
        }
    }
}
