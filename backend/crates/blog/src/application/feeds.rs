//! Feed Export
//!
//! Renders the current post set as sitemap and RSS XML. The interesting
//! contract is the input selection (all posts for the sitemap, the 50
//! newest for RSS); the XML itself is plain quick-xml writing.

use std::sync::Arc;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::application::config::SiteConfig;
use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// How many posts the RSS feed carries
pub const RSS_ITEM_LIMIT: i64 = 50;

/// Feeds use case
pub struct FeedsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
    site: Arc<SiteConfig>,
}

impl<P> FeedsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>, site: Arc<SiteConfig>) -> Self {
        Self { post_repo, site }
    }

    /// Sitemap over every post plus the static pages
    pub async fn sitemap(&self) -> BlogResult<String> {
        let posts = self.post_repo.list_all().await?;
        render_sitemap(&self.site, &posts)
    }

    /// RSS feed over the newest posts
    pub async fn rss(&self) -> BlogResult<String> {
        let posts = self.post_repo.list_recent(RSS_ITEM_LIMIT).await?;
        render_rss(&self.site, &posts)
    }
}

// ============================================================================
// Renderers (pure)
// ============================================================================

struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    fn new() -> BlogResult<Self> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    fn open(&mut self, element: BytesStart<'_>) -> BlogResult<()> {
        self.writer
            .write_event(Event::Start(element))
            .map_err(xml_err)
    }

    fn close(&mut self, name: &str) -> BlogResult<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    fn text_element(&mut self, name: &str, text: &str) -> BlogResult<()> {
        self.open(BytesStart::new(name))?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)?;
        self.close(name)
    }

    fn finish(self) -> BlogResult<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| BlogError::Internal(format!("Feed rendering produced bad UTF-8: {e}")))
    }
}

fn xml_err(e: impl std::fmt::Display) -> BlogError {
    BlogError::Internal(format!("Feed rendering failed: {e}"))
}

/// Render the sitemap: `/` and `/about` static entries plus one `/post/{id}`
/// entry per post with its last modification time
pub fn render_sitemap(site: &SiteConfig, posts: &[Post]) -> BlogResult<String> {
    let mut xml = XmlBuilder::new()?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"));
    xml.open(urlset)?;

    write_sitemap_url(&mut xml, &site.site_url, "/", "daily", "1.0", None)?;
    write_sitemap_url(&mut xml, &site.site_url, "/about", "monthly", "0.7", None)?;

    for post in posts {
        let path = format!("/post/{}", post.post_id);
        write_sitemap_url(
            &mut xml,
            &site.site_url,
            &path,
            "weekly",
            "0.8",
            Some(&post.updated_at.to_rfc3339()),
        )?;
    }

    xml.close("urlset")?;
    xml.finish()
}

fn write_sitemap_url(
    xml: &mut XmlBuilder,
    site_url: &str,
    path: &str,
    changefreq: &str,
    priority: &str,
    lastmod: Option<&str>,
) -> BlogResult<()> {
    xml.open(BytesStart::new("url"))?;
    xml.text_element("loc", &format!("{site_url}{path}"))?;
    xml.text_element("changefreq", changefreq)?;
    xml.text_element("priority", priority)?;
    if let Some(lastmod) = lastmod {
        xml.text_element("lastmod", lastmod)?;
    }
    xml.close("url")
}

/// Render the RSS 2.0 feed over the given posts (already selected and
/// ordered newest-first by the caller)
pub fn render_rss(site: &SiteConfig, posts: &[Post]) -> BlogResult<String> {
    let mut xml = XmlBuilder::new()?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    xml.open(rss)?;

    xml.open(BytesStart::new("channel"))?;
    xml.text_element("title", &site.title)?;
    xml.text_element("description", &site.description)?;
    xml.text_element("link", &site.site_url)?;
    xml.text_element("language", "en")?;

    for post in posts {
        xml.open(BytesStart::new("item"))?;
        xml.text_element("title", &post.title)?;
        xml.text_element("description", &post.content)?;
        xml.text_element("link", &format!("{}/post/{}", site.site_url, post.post_id))?;
        xml.text_element("pubDate", &post.created_at.to_rfc2822())?;
        xml.close("item")?;
    }

    xml.close("channel")?;
    xml.close("rss")?;
    xml.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    fn sample_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                Post::new(
                    format!("Post {i}"),
                    format!("Body of post {i}"),
                    UserId::new(),
                    "general".to_string(),
                    vec![],
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn test_sitemap_contains_static_and_post_urls() {
        let site = SiteConfig::default();
        let posts = sample_posts(2);

        let xml = render_sitemap(&site, &posts).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("http://www.sitemaps.org/schemas/sitemap/0.9"));
        assert!(xml.contains(&format!("<loc>{}/</loc>", site.site_url)));
        assert!(xml.contains(&format!("<loc>{}/about</loc>", site.site_url)));
        for post in &posts {
            assert!(xml.contains(&format!("<loc>{}/post/{}</loc>", site.site_url, post.post_id)));
        }
        assert!(xml.contains("<lastmod>"));
    }

    #[test]
    fn test_rss_channel_and_items() {
        let site = SiteConfig::default();
        let posts = sample_posts(3);

        let xml = render_rss(&site, &posts).unwrap();

        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains(&format!("<title>{}</title>", site.title)));
        assert!(xml.contains(&format!("<description>{}</description>", site.description)));
        assert_eq!(xml.matches("<item>").count(), 3);
        assert!(xml.contains("<pubDate>"));
    }

    #[test]
    fn test_xml_escapes_content() {
        let site = SiteConfig::default();
        let mut posts = sample_posts(1);
        posts[0].title = "Tips & <tricks>".to_string();

        let xml = render_rss(&site, &posts).unwrap();

        assert!(xml.contains("Tips &amp; &lt;tricks&gt;"));
        assert!(!xml.contains("Tips & <tricks>"));
    }

    #[test]
    fn test_empty_post_set_renders() {
        let site = SiteConfig::default();
        assert!(render_sitemap(&site, &[]).is_ok());
        let rss = render_rss(&site, &[]).unwrap();
        assert_eq!(rss.matches("<item>").count(), 0);
    }
}
