//! Filter engine for the notes page.
//!
//! Every derived collection is recomputed from the source snapshot on each call:
//! full collection -> category filter -> combined search/tag filter.

use crate::models::{Article, NotesQuery, NotesView, TagFilter};
use std::collections::HashSet;

// ============================================================================
// Category Filter
// ============================================================================

pub fn notes_articles(articles: &[Article]) -> Vec<Article> {
    articles.iter().filter(|a| a.is_note()).cloned().collect()
}

// ============================================================================
// Tag Universe
// ============================================================================

/// Distinct tags across `notes`, in order of first occurrence.
pub fn all_tags(notes: &[Article]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in notes.iter().flat_map(|a| &a.tags) {
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

// ============================================================================
// Combined Filter
// ============================================================================

pub fn matches_search(article: &Article, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let term = search_term.to_lowercase();
    article.title.to_lowercase().contains(&term)
        || article
            .summary
            .as_deref()
            .map(|s| s.to_lowercase().contains(&term))
            .unwrap_or(false)
}

pub fn matches_tag(article: &Article, selected: &TagFilter) -> bool {
    match selected {
        TagFilter::All => true,
        TagFilter::Tag(tag) => article.tags.iter().any(|t| t == tag),
    }
}

pub fn filtered_articles(notes: &[Article], query: &NotesQuery) -> Vec<Article> {
    notes
        .iter()
        .filter(|a| matches_search(a, &query.search_term) && matches_tag(a, &query.selected_tag))
        .cloned()
        .collect()
}

/// Run the whole pipeline over one collection snapshot.
pub fn derive_view(articles: &[Article], query: &NotesQuery) -> NotesView {
    let notes = notes_articles(articles);
    let tags = all_tags(&notes);
    let filtered = filtered_articles(&notes, query);

    tracing::debug!(
        total = articles.len(),
        notes = notes.len(),
        filtered = filtered.len(),
        tags = tags.len(),
        "derived notes view"
    );

    NotesView {
        total: articles.len(),
        notes,
        all_tags: tags,
        filtered,
    }
}

// ============================================================================
// Text Truncation
// ============================================================================

/// Truncate `text` to `max_len` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}
