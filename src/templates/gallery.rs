//! Notes gallery page: search form, tag selector, and the card grid.

use crate::config::SiteConfig;
use crate::filter::truncate_text;
use crate::models::{Article, NotesQuery, NotesView, TagFilter};

use super::components::{base_html, html_escape};

/// Tags shown on a card before collapsing into a `+N` indicator.
pub const MAX_CARD_TAGS: usize = 3;

/// What the grid area shows for the current index state.
#[derive(Clone, Copy)]
pub enum GalleryBody<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a NotesView),
}

/// Link back to the gallery with the given search term and tag.
pub fn gallery_href(search_term: &str, tag: &TagFilter) -> String {
    let mut params = Vec::new();
    if !search_term.is_empty() {
        params.push(format!("q={}", urlencoding::encode(search_term)));
    }
    if let TagFilter::Tag(t) = tag {
        params.push(format!("tag={}", urlencoding::encode(t)));
    }
    if params.is_empty() {
        "/notes".to_string()
    } else {
        format!("/notes?{}", params.join("&"))
    }
}

// ============================================================================
// Filters
// ============================================================================

fn search_form(site: &SiteConfig, query: &NotesQuery) -> String {
    let tag_field = match query.selected_tag {
        TagFilter::All => String::new(),
        TagFilter::Tag(ref t) => format!(
            r#"<input type="hidden" name="tag" value="{}">"#,
            html_escape(t)
        ),
    };

    format!(
        r#"<form class="search-form" action="/notes" method="get">
            <input type="text" name="q" placeholder="{}" value="{}">
            {}
        </form>"#,
        html_escape(&site.search_placeholder),
        html_escape(&query.search_term),
        tag_field
    )
}

fn tag_button(label: &str, href: &str, active: bool) -> String {
    format!(
        r#"<a class="tag-button{}" href="{}">{}</a>"#,
        if active { " active" } else { "" },
        html_escape(href),
        html_escape(label)
    )
}

fn tag_bar(site: &SiteConfig, query: &NotesQuery, all_tags: &[String]) -> String {
    let mut html = String::from(r#"<div class="tag-bar">"#);
    html.push_str(&tag_button(
        &site.all_label,
        &gallery_href(&query.search_term, &TagFilter::All),
        query.selected_tag.is_all(),
    ));
    for tag in all_tags {
        html.push_str(&tag_button(
            tag,
            &gallery_href(&query.search_term, &TagFilter::Tag(tag.clone())),
            query.selected_tag.is_selected(tag),
        ));
    }
    html.push_str("</div>");
    html
}

// ============================================================================
// Cards
// ============================================================================

pub fn render_card(article: &Article, site: &SiteConfig) -> String {
    let cover = match article.cover {
        Some(ref src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            html_escape(src),
            html_escape(&article.title)
        ),
        None => String::new(),
    };

    let summary = match article.summary.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => format!(
            r#"<p class="note-summary">{}</p>"#,
            html_escape(&truncate_text(s, site.summary_max_chars))
        ),
        None => String::new(),
    };

    let mut tags = String::new();
    if !article.tags.is_empty() {
        tags.push_str(r#"<div class="note-tags">"#);
        for tag in article.tags.iter().take(MAX_CARD_TAGS) {
            tags.push_str(&format!(r#"<span class="note-tag">{}</span>"#, html_escape(tag)));
        }
        if article.tags.len() > MAX_CARD_TAGS {
            tags.push_str(&format!(
                r#"<span class="note-tag more">+{}</span>"#,
                article.tags.len() - MAX_CARD_TAGS
            ));
        }
        tags.push_str("</div>");
    }

    format!(
        r#"<a class="note-card" href="{href}" data-slug="{slug}">
            <div class="note-cover">{cover}</div>
            <div class="note-overlay">
                <h3 class="note-title">{title}</h3>
                {summary}{tags}
            </div>
        </a>"#,
        href = html_escape(&article.href()),
        slug = html_escape(&article.slug),
        cover = cover,
        title = html_escape(&article.title),
        summary = summary,
        tags = tags,
    )
}

fn card_grid(view: &NotesView, site: &SiteConfig) -> String {
    if view.filtered.is_empty() {
        return format!(
            r#"<div class="empty-state"><p>{}</p></div>"#,
            html_escape(&site.empty_message)
        );
    }

    let mut html = String::from(r#"<div class="note-grid">"#);
    for article in &view.filtered {
        html.push_str(&render_card(article, site));
    }
    html.push_str("</div>");
    html
}

// ============================================================================
// Page
// ============================================================================

pub fn render_gallery(site: &SiteConfig, query: &NotesQuery, body: GalleryBody<'_>) -> String {
    let no_tags: &[String] = &[];
    let all_tags = match body {
        GalleryBody::Ready(view) => view.all_tags.as_slice(),
        _ => no_tags,
    };

    let main = match body {
        GalleryBody::Loading => format!(
            r#"<div class="loading-state"><p>{}</p></div>"#,
            html_escape(&site.loading_message)
        ),
        GalleryBody::Failed(reason) => format!(
            r#"<div class="error-state"><p>Could not load notes.</p><small>{}</small></div>"#,
            html_escape(reason)
        ),
        GalleryBody::Ready(view) => card_grid(view, site),
    };

    let content = format!(
        r#"<div class="filters">
            {}
            {}
        </div>
        {}"#,
        search_form(site, query),
        tag_bar(site, query, all_tags),
        main
    );

    base_html(&site.title, &content, site)
}
