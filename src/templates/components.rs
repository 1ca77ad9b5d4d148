//! Shared HTML components for the notes gallery.
//!
//! Contains escaping and markdown helpers, the navigation bar, and the base
//! HTML template every page is wrapped in.

use axum::http::StatusCode;
use pulldown_cmark::Parser;

use crate::config::SiteConfig;

use super::styles::STYLE;

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Markdown Rendering
// ============================================================================

pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new(content);
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    // Article bodies may carry raw HTML
    ammonia::clean(&html_output)
}

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(site: &SiteConfig) -> String {
    format!(
        r#"<nav class="nav-bar">
            <a href="/notes" class="site-title">{}</a>
        </nav>"#,
        html_escape(&site.title)
    )
}

// ============================================================================
// Base HTML Template
// ============================================================================

pub fn base_html(title: &str, content: &str, site: &SiteConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav_bar(site),
    )
}

/// Standalone error page. Used where no site config is at hand.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"<div class="error-state">
            <h1>{}</h1>
            <p>{}</p>
            <a href="/notes" class="back-link">&larr; Back to notes</a>
        </div>"#,
        status.as_u16(),
        html_escape(message)
    );
    base_html(
        status.canonical_reason().unwrap_or("Error"),
        &content,
        &SiteConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_markdown_sanitizes() {
        let html = render_markdown("# Title\n\n<script>alert(1)</script>\n\n**bold**");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_base_html_escapes_title() {
        let site = SiteConfig {
            title: "A <b> site".to_string(),
            ..SiteConfig::default()
        };
        let html = base_html("x & y", "<p>body</p>", &site);
        assert!(html.contains("<title>x &amp; y</title>"));
        assert!(html.contains("A &lt;b&gt; site"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Not found: <slug>");
        assert!(html.contains("404"));
        assert!(html.contains("Not found: &lt;slug&gt;"));
    }
}
