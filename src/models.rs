//! Data models for the notes gallery.
//!
//! This module contains the article record served by the content index, the
//! per-request query state, and the derived view produced by the filter engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category value an article must carry to appear on the notes page.
pub const NOTES_CATEGORY: &str = "Notes";

/// Tag filter value meaning "no tag restriction".
pub const ALL_TAGS: &str = "all";

// ============================================================================
// Article Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Absent or `null` in the index both mean "no tags".
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Article {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            summary: None,
            category: category.into(),
            tags: Vec::new(),
            cover: None,
            date: None,
            body: None,
            hidden: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn is_note(&self) -> bool {
        self.category == NOTES_CATEGORY
    }

    /// Path of the detail page for this article.
    pub fn href(&self) -> String {
        format!("/blog/{}", urlencoding::encode(&self.slug))
    }
}

// ============================================================================
// Query State
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Parse a raw `tag` parameter. Missing, empty, and `"all"` mean no restriction.
    /// Anything else is kept verbatim, whitespace included, so it still matches the tag.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL_TAGS) => TagFilter::All,
            Some(tag) => TagFilter::Tag(tag.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TagFilter::All)
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        matches!(self, TagFilter::Tag(t) if t == tag)
    }
}

/// Raw query parameters accepted by the notes page and API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotesParams {
    pub q: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesQuery {
    pub search_term: String,
    pub selected_tag: TagFilter,
}

impl NotesQuery {
    pub fn new(search_term: impl Into<String>, selected_tag: TagFilter) -> Self {
        Self {
            search_term: search_term.into(),
            selected_tag,
        }
    }
}

impl From<NotesParams> for NotesQuery {
    fn from(params: NotesParams) -> Self {
        Self {
            search_term: params.q.unwrap_or_default(),
            selected_tag: TagFilter::parse(params.tag.as_deref()),
        }
    }
}

// ============================================================================
// Derived View
// ============================================================================

/// Everything the notes page displays, derived from one collection snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotesView {
    pub total: usize,
    pub notes: Vec<Article>,
    pub all_tags: Vec<String>,
    pub filtered: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filter_parse() {
        assert_eq!(TagFilter::parse(None), TagFilter::All);
        assert_eq!(TagFilter::parse(Some("")), TagFilter::All);
        assert_eq!(TagFilter::parse(Some("all")), TagFilter::All);
        assert_eq!(TagFilter::parse(Some("rust")), TagFilter::Tag("rust".into()));
        // Tags are case-sensitive, so "All" is a real tag
        assert_eq!(TagFilter::parse(Some("All")), TagFilter::Tag("All".into()));
    }

    #[test]
    fn test_tag_filter_keeps_whitespace() {
        assert_eq!(TagFilter::parse(Some(" rust")), TagFilter::Tag(" rust".into()));
        assert_eq!(TagFilter::parse(Some("rust ")), TagFilter::Tag("rust ".into()));
        assert_eq!(TagFilter::parse(Some(" ")), TagFilter::Tag(" ".into()));
        assert_eq!(TagFilter::parse(Some(" all")), TagFilter::Tag(" all".into()));
    }

    #[test]
    fn test_article_missing_or_null_tags() {
        let a: Article =
            serde_json::from_str(r#"{"slug":"a","title":"A","category":"Notes"}"#).unwrap();
        assert!(a.tags.is_empty());
        assert!(a.summary.is_none());

        let b: Article =
            serde_json::from_str(r#"{"slug":"b","title":"B","category":"Notes","tags":null}"#)
                .unwrap();
        assert!(b.tags.is_empty());
    }

    #[test]
    fn test_article_href_encodes_slug() {
        let a = Article::new("two words", "T", NOTES_CATEGORY);
        assert_eq!(a.href(), "/blog/two%20words");
    }

    #[test]
    fn test_query_from_params() {
        let q: NotesQuery = NotesParams {
            q: Some("rust".into()),
            tag: Some("go".into()),
        }
        .into();
        assert_eq!(q, NotesQuery::new("rust", TagFilter::Tag("go".into())));
        assert_eq!(NotesQuery::from(NotesParams::default()), NotesQuery::default());
    }
}
