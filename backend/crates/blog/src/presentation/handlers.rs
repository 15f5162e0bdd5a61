//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::presentation::middleware::MaybeUser;
use kernel::id::{PostId, UserId};
use kernel::response::ApiResponse;
use platform::media::{MediaStore, UploadedFile};

use crate::application::config::SiteConfig;
use crate::application::{
    CommentUseCase, CreateCommentInput, CreatePostInput, CreatePostUseCase, DeletePostUseCase,
    FeedsUseCase, GetPostUseCase, ListPostsUseCase, StatsUseCase, TrendingUseCase,
    UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::query::PostQuery;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, DeleteAllResponse, ListQuery, PostResponse,
    StatsResponse,
};

/// Shared state for post handlers
#[derive(Clone)]
pub struct BlogAppState<R, M>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<M>,
}

/// Shared state for comment handlers
#[derive(Clone)]
pub struct CommentsState<C>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<C>,
}

/// Shared state for feed handlers
#[derive(Clone)]
pub struct FeedsState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub site: Arc<SiteConfig>,
}

/// Parse a post id path segment; an unparseable id reads as a missing post
fn parse_post_id(raw: &str) -> BlogResult<PostId> {
    PostId::parse(raw).map_err(|_| BlogError::PostNotFound)
}

fn viewer_id(maybe: &MaybeUser) -> Option<UserId> {
    maybe.0.as_ref().map(|user| user.id)
}

// ============================================================================
// Listing
// ============================================================================

/// GET /api/posts
pub async fn get_all_posts<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Query(params): Query<ListQuery>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let query = query_from_params(params);

    let posts = ListPostsUseCase::new(state.repo.clone()).execute(query).await?;

    Ok(ApiResponse::ok(
        "Posts retrieved successfully",
        posts.iter().map(PostResponse::from).collect::<Vec<_>>(),
    ))
}

/// GET /api/admin/posts
///
/// Same listing, restricted to the caller's own posts.
pub async fn get_admin_posts<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
    Query(params): Query<ListQuery>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let query = query_from_params(params);

    let posts = ListPostsUseCase::new(state.repo.clone())
        .execute_admin(viewer_id(&current), query)
        .await?;

    Ok(ApiResponse::ok(
        "Posts retrieved successfully",
        posts.iter().map(PostResponse::from).collect::<Vec<_>>(),
    ))
}

fn query_from_params(params: ListQuery) -> PostQuery {
    PostQuery::from_raw(
        params.search,
        params.category,
        params.tag,
        params.page.as_deref(),
        params.limit.as_deref(),
        params.sort.as_deref(),
    )
}

// ============================================================================
// Single post
// ============================================================================

/// GET /api/post/{id} (public) and GET /api/admin/post/{id} (gated)
///
/// Anonymous reads bump the view counter; authenticated reads never do.
pub async fn get_post_by_id<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
    Path(id): Path<String>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    let post = GetPostUseCase::new(state.repo.clone())
        .execute(viewer_id(&current), &post_id)
        .await?;

    Ok(ApiResponse::ok(
        "Post retrieved successfully",
        PostResponse::from(&post),
    ))
}

// ============================================================================
// Create / Update / Delete
// ============================================================================

/// POST /api/post
///
/// Multipart form: `title`, `content`, `category`, repeatable `tags`
/// (comma-splittable), optional `image` file.
pub async fn create_post<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
    mut multipart: Multipart,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let mut title = String::new();
    let mut content = String::new();
    let mut category = String::new();
    let mut tags: Vec<String> = Vec::new();
    let mut image: Option<UploadedFile> = None;

    while let Some(field) = next_field(&mut multipart).await? {
        match field.name() {
            Some("title") => title = read_text(field).await?,
            Some("content") => content = read_text(field).await?,
            Some("category") => category = read_text(field).await?,
            Some("tags") => push_tags(&read_text(field).await?, &mut tags),
            Some("image") => image = Some(read_file(field).await?),
            _ => {}
        }
    }

    let post = CreatePostUseCase::new(state.repo.clone(), state.media.clone())
        .execute(
            viewer_id(&current),
            CreatePostInput {
                title,
                content,
                category,
                tags,
                image,
            },
        )
        .await?;

    Ok(ApiResponse::created(
        "Post created successfully",
        PostResponse::from(&post),
    ))
}

/// PUT /api/post/{id}
pub async fn update_post<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    let mut input = UpdatePostInput::default();

    while let Some(field) = next_field(&mut multipart).await? {
        match field.name() {
            Some("title") => input.title = Some(read_text(field).await?),
            Some("content") => input.content = Some(read_text(field).await?),
            Some("category") => input.category = Some(read_text(field).await?),
            Some("tags") => {
                let mut tags = input.tags.take().unwrap_or_default();
                push_tags(&read_text(field).await?, &mut tags);
                input.tags = Some(tags);
            }
            Some("image") => input.image = Some(read_file(field).await?),
            _ => {}
        }
    }

    let post = UpdatePostUseCase::new(state.repo.clone(), state.media.clone())
        .execute(viewer_id(&current), &post_id, input)
        .await?;

    Ok(ApiResponse::ok(
        "Post updated successfully",
        PostResponse::from(&post),
    ))
}

/// DELETE /api/post/{id}
pub async fn delete_post<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
    Path(id): Path<String>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    let post = DeletePostUseCase::new(state.repo.clone())
        .execute(viewer_id(&current), &post_id)
        .await?;

    Ok(ApiResponse::ok(
        "Post deleted successfully",
        PostResponse::from(&post),
    ))
}

/// DELETE /api/posts
///
/// Unrestricted bulk delete; intentionally carries no auth.
pub async fn delete_all_posts<R, M>(
    State(state): State<BlogAppState<R, M>>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let deleted = DeletePostUseCase::new(state.repo.clone())
        .execute_all()
        .await?;

    Ok(ApiResponse::ok(
        "All posts deleted successfully",
        DeleteAllResponse {
            deleted_count: deleted,
        },
    ))
}

// ============================================================================
// Trending
// ============================================================================

/// GET /api/posts/trending
pub async fn get_trending<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let posts = TrendingUseCase::new(state.repo.clone())
        .current(viewer_id(&current))
        .await?;

    Ok(ApiResponse::ok(
        "Trending posts retrieved successfully",
        posts.iter().map(PostResponse::from).collect::<Vec<_>>(),
    ))
}

/// POST /api/posts/refresh-trending
pub async fn refresh_trending<R, M>(
    State(state): State<BlogAppState<R, M>>,
    Extension(current): Extension<MaybeUser>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let posts = TrendingUseCase::new(state.repo.clone())
        .refresh(viewer_id(&current))
        .await?;

    Ok(ApiResponse::ok(
        "Trending posts refreshed successfully",
        posts.iter().map(PostResponse::from).collect::<Vec<_>>(),
    ))
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/posts/stats
pub async fn get_post_stats<R, M>(
    State(state): State<BlogAppState<R, M>>,
) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let stats = StatsUseCase::new(state.repo.clone()).execute().await?;

    Ok(ApiResponse::ok(
        "Post statistics retrieved successfully",
        StatsResponse::from(&stats),
    ))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/comments/{postId}
pub async fn make_comment<C>(
    State(state): State<CommentsState<C>>,
    Path(post_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> BlogResult<impl IntoResponse>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id = PostId::parse(&post_id)
        .map_err(|_| BlogError::Validation("Post ID is required".to_string()))?;

    let comment = CommentUseCase::new(state.repo.clone())
        .create(
            post_id,
            CreateCommentInput {
                user_name: req.user_name,
                text: req.text,
            },
        )
        .await?;

    Ok(ApiResponse::created(
        "Comment created successfully",
        CommentResponse::from(&comment),
    ))
}

/// GET /api/comments/{postId}
pub async fn get_comments<C>(
    State(state): State<CommentsState<C>>,
    Path(post_id): Path<String>,
) -> BlogResult<impl IntoResponse>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id = PostId::parse(&post_id)
        .map_err(|_| BlogError::Validation("Post ID is required".to_string()))?;

    let comments = CommentUseCase::new(state.repo.clone()).list(&post_id).await?;

    let message = if comments.is_empty() {
        "No comments found"
    } else {
        "Comments retrieved successfully"
    };

    Ok(ApiResponse::ok(
        message,
        comments.iter().map(CommentResponse::from).collect::<Vec<_>>(),
    ))
}

// ============================================================================
// Feeds
// ============================================================================

/// GET /sitemap.xml
pub async fn sitemap<R>(State(state): State<FeedsState<R>>) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let xml = FeedsUseCase::new(state.repo.clone(), state.site.clone())
        .sitemap()
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    ))
}

/// GET /rss.xml
pub async fn rss_feed<R>(State(state): State<FeedsState<R>>) -> BlogResult<impl IntoResponse>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let xml = FeedsUseCase::new(state.repo.clone(), state.site.clone())
        .rss()
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/rss+xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    ))
}

// ============================================================================
// Multipart helpers
// ============================================================================

async fn next_field(
    multipart: &mut Multipart,
) -> BlogResult<Option<axum::extract::multipart::Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(|_| BlogError::Validation("Malformed multipart form".to_string()))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> BlogResult<String> {
    field
        .text()
        .await
        .map_err(|_| BlogError::Validation("Malformed multipart form".to_string()))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> BlogResult<UploadedFile> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| BlogError::Validation("Malformed multipart form".to_string()))?;

    Ok(UploadedFile::new(bytes.to_vec(), filename, content_type)?)
}

/// Accumulate a `tags` form value; each value may carry several
/// comma-separated tags
fn push_tags(raw: &str, tags: &mut Vec<String>) {
    for tag in raw.split(',') {
        let tag = tag.trim();
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }
}
