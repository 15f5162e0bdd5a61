//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

/// Image shown when a post was created without an upload
pub const DEFAULT_POST_IMAGE: &str = "https://www.shutterstock.com/image-vector/illustration-default-avatar-profile-placeholder-260nw-1757107944.jpg";

/// Post entity
///
/// The author is set once at creation and never changed afterwards; an
/// update applies any subset of the remaining content fields.
#[derive(Debug, Clone)]
pub struct Post {
    /// Internal UUID identifier
    pub post_id: PostId,
    /// Title (required)
    pub title: String,
    /// Body (required)
    pub content: String,
    /// Owning user; immutable after creation
    pub author_id: UserId,
    /// Category (required)
    pub category: String,
    /// Ordered tag list (default empty)
    pub tags: Vec<String>,
    /// Set by the trending recompute
    pub is_trending: bool,
    /// Anonymous-read counter; never decreases
    pub views: i64,
    /// Hosted image URL or the default placeholder
    pub image_url: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a post
///
/// Absent fields are left untouched. There is deliberately no author
/// field here.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl PostPatch {
    /// Whether the patch carries no change at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image_url.is_none()
    }
}

impl Post {
    /// Create a new post
    pub fn new(
        title: String,
        content: String,
        author_id: UserId,
        category: String,
        tags: Vec<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            title,
            content,
            author_id,
            category,
            tags,
            is_trending: false,
            views: 0,
            image_url: image_url.unwrap_or_else(|| DEFAULT_POST_IMAGE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given user is this post's author
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }

    /// Count an anonymous read
    pub fn record_view(&mut self) {
        self.views += 1;
        self.updated_at = Utc::now();
    }

    /// Flag this post as trending
    pub fn mark_trending(&mut self) {
        self.is_trending = true;
        self.updated_at = Utc::now();
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        self.updated_at = Utc::now();
    }
}
