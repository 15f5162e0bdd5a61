//! Post Query Model
//!
//! Filter, sort, and pagination criteria for the post listing. Raw request
//! parameters are folded into a validated [`PostQuery`] here so that the
//! semantics (AND-combined filters, clamped paging, default sort) live in
//! one place and are testable without HTTP or a database.

use kernel::id::UserId;

/// Default page when the parameter is absent or unparseable
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the parameter is absent or unparseable
pub const DEFAULT_LIMIT: u32 = 10;

/// Sort direction on creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a raw sort parameter: exactly `"asc"` sorts ascending,
    /// anything else (including absence) sorts descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// Validated post listing criteria
///
/// Every provided filter constrains the result (logical AND); an absent
/// filter imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring match against title OR content
    pub search: Option<String>,
    /// Case-insensitive substring match against the category
    pub category: Option<String>,
    /// Exact membership in the post's tag list
    pub tag: Option<String>,
    /// Exact author match (admin-scoped listing)
    pub author: Option<UserId>,
    /// 1-based page number (>= 1)
    pub page: u32,
    /// Page size (>= 1)
    pub limit: u32,
    /// Sort direction on creation time
    pub sort: SortDirection,
}

impl PostQuery {
    /// Build a query from raw request parameters
    ///
    /// Non-numeric or missing `page`/`limit` fall back to their defaults
    /// instead of surfacing a parse failure; numeric values are clamped to
    /// a minimum of 1. Empty-string filters count as absent.
    pub fn from_raw(
        search: Option<String>,
        category: Option<String>,
        tag: Option<String>,
        page: Option<&str>,
        limit: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            category: category.filter(|s| !s.is_empty()),
            tag: tag.filter(|s| !s.is_empty()),
            author: None,
            page: clamp_param(page, DEFAULT_PAGE),
            limit: clamp_param(limit, DEFAULT_LIMIT),
            sort: SortDirection::parse(sort),
        }
    }

    /// Restrict the query to a single author
    pub fn for_author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    /// Offset of the first row of the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Parse a numeric parameter, falling back to `default` on anything
/// unparseable and clamping numeric values to a minimum of 1
fn clamp_param(raw: Option<&str>, default: u32) -> u32 {
    match raw {
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| n.clamp(1, i64::from(u32::MAX)) as u32)
            .unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PostQuery::from_raw(None, None, None, None, None, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, SortDirection::Desc);
        assert!(query.search.is_none());
        assert!(query.author.is_none());
    }

    #[test]
    fn test_non_numeric_paging_falls_back() {
        let query = PostQuery::from_raw(None, None, None, Some("abc"), Some("-"), None);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_zero_and_negative_clamp_to_one() {
        let query = PostQuery::from_raw(None, None, None, Some("0"), Some("-3"), None);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn test_numeric_paging_parsed() {
        let query = PostQuery::from_raw(None, None, None, Some("3"), Some("25"), None);
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 25);
    }

    #[test]
    fn test_sort_parsing_is_exact() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        // Anything that is not exactly "asc" sorts descending
        assert_eq!(SortDirection::parse(Some("ASC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("ascending")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }

    #[test]
    fn test_empty_filters_count_as_absent() {
        let query = PostQuery::from_raw(
            Some("".to_string()),
            Some("".to_string()),
            Some("".to_string()),
            None,
            None,
            None,
        );
        assert!(query.search.is_none());
        assert!(query.category.is_none());
        assert!(query.tag.is_none());
    }

    #[test]
    fn test_offset_math() {
        let query = PostQuery::from_raw(None, None, None, Some("1"), Some("10"), None);
        assert_eq!(query.offset(), 0);

        let query = PostQuery::from_raw(None, None, None, Some("2"), Some("10"), None);
        assert_eq!(query.offset(), 10);

        let query = PostQuery::from_raw(None, None, None, Some("7"), Some("3"), None);
        assert_eq!(query.offset(), 18);
    }

    #[test]
    fn test_for_author() {
        let author = UserId::new();
        let query = PostQuery::from_raw(None, None, None, None, None, None).for_author(author);
        assert_eq!(query.author, Some(author));
    }
}
