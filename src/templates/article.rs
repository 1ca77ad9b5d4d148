//! Article detail page.

use crate::config::SiteConfig;
use crate::models::{Article, TagFilter};

use super::components::{base_html, html_escape, render_markdown};
use super::gallery::gallery_href;

pub fn render_article(article: &Article, site: &SiteConfig) -> String {
    let mut meta = String::from(r#"<div class="meta">"#);
    if let Some(date) = article.date {
        meta.push_str(&format!(
            "<time datetime=\"{0}\">{0}</time> ",
            date.format("%Y-%m-%d")
        ));
    }
    for tag in &article.tags {
        meta.push_str(&format!(
            r#"<a class="tag-button" href="{}">{}</a>"#,
            html_escape(&gallery_href("", &TagFilter::Tag(tag.clone()))),
            html_escape(tag)
        ));
    }
    meta.push_str("</div>");

    let cover = match article.cover {
        Some(ref src) => format!(
            r#"<img class="article-cover" src="{}" alt="{}">"#,
            html_escape(src),
            html_escape(&article.title)
        ),
        None => String::new(),
    };

    // Index entries without a body fall back to their summary
    let body = match (article.body.as_deref(), article.summary.as_deref()) {
        (Some(md), _) if !md.trim().is_empty() => render_markdown(md),
        (_, Some(summary)) => format!("<p>{}</p>", html_escape(summary)),
        _ => String::new(),
    };

    let content = format!(
        r#"<a href="/notes" class="back-link">&larr; {}</a>
        <article class="article">
            <h1>{}</h1>
            {}
            {}
            <div class="article-content">{}</div>
        </article>"#,
        html_escape(&site.title),
        html_escape(&article.title),
        meta,
        cover,
        body
    );

    base_html(&article.title, &content, site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOTES_CATEGORY;
    use chrono::NaiveDate;

    #[test]
    fn test_render_article_body_and_tags() {
        let mut article =
            Article::new("rust", "Rust Ownership", NOTES_CATEGORY).with_tags(["rust", "a b"]);
        article.body = Some("## Moves\n\nValues have *one* owner.".into());
        article.date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let html = render_article(&article, &SiteConfig::default());
        assert!(html.contains("<h1>Rust Ownership</h1>"));
        assert!(html.contains("<h2>Moves</h2>"));
        assert!(html.contains("<em>one</em>"));
        assert!(html.contains(r#"<time datetime="2024-03-01">2024-03-01</time>"#));
        assert!(html.contains(r#"href="/notes?tag=a%20b""#));
    }

    #[test]
    fn test_render_article_summary_fallback() {
        let article = Article::new("x", "X", NOTES_CATEGORY).with_summary("Only <summary>");
        let html = render_article(&article, &SiteConfig::default());
        assert!(html.contains("<p>Only &lt;summary&gt;</p>"));
    }
}
