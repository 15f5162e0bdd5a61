//! Trending Selection
//!
//! Pure top-N selection over the full post set. The recompute is not
//! incremental: it marks the current top posts and leaves previously
//! flagged posts untouched, so the persisted trending set can drift from
//! the selection until flags are cleaned up manually.

use crate::domain::entity::post::Post;

/// How many posts the trending set holds
pub const TRENDING_LIMIT: usize = 10;

/// Select the trending posts: top [`TRENDING_LIMIT`] by view count
///
/// The sort is stable, so posts with equal view counts keep their input
/// order. Returns the selection sorted by views, highest first.
pub fn select_trending(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.views.cmp(&a.views));
    posts.truncate(TRENDING_LIMIT);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    fn post_with_views(title: &str, views: i64) -> Post {
        let mut post = Post::new(
            title.to_string(),
            "content".to_string(),
            UserId::new(),
            "general".to_string(),
            vec![],
            None,
        );
        post.views = views;
        post
    }

    #[test]
    fn test_selects_top_ten_by_views() {
        // 12 posts; the bottom two must drop out
        let mut views: Vec<i64> = (0..10).map(|i| 50 - i * 5).collect();
        views.push(5);
        views.push(1);
        let posts: Vec<Post> = views
            .iter()
            .enumerate()
            .map(|(i, &v)| post_with_views(&format!("post-{i}"), v))
            .collect();

        let selected = select_trending(posts);

        assert_eq!(selected.len(), TRENDING_LIMIT);
        let selected_views: Vec<i64> = selected.iter().map(|p| p.views).collect();
        assert_eq!(selected_views, vec![50, 45, 40, 35, 30, 25, 20, 15, 10, 5]);
    }

    #[test]
    fn test_sorted_descending_by_views() {
        let posts = vec![
            post_with_views("low", 1),
            post_with_views("high", 100),
            post_with_views("mid", 50),
        ];

        let selected = select_trending(posts);
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let posts = vec![
            post_with_views("first", 10),
            post_with_views("second", 10),
            post_with_views("third", 10),
        ];

        let selected = select_trending(posts);
        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_fewer_posts_than_limit() {
        let posts = vec![post_with_views("only", 3)];
        assert_eq!(select_trending(posts).len(), 1);
    }
}
