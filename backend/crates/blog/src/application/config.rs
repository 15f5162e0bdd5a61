//! Application Configuration
//!
//! Site-level settings consumed by the feed renderers.

/// Site configuration for feed generation
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Canonical site URL (no trailing slash)
    pub site_url: String,
    /// Feed channel title
    pub title: String,
    /// Feed channel description
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://intraverse.me".to_string(),
            title: "IntraVerse Blog".to_string(),
            description: "Latest articles from IntraVerse Blog".to_string(),
        }
    }
}
