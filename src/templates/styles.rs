//! CSS styles for the notes gallery.
//!
//! Contains the STYLE constant shared by every page.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --brand: var(--blue);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 1920px;
    margin: 0 auto;
    padding: 1.5rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); }

h1, h2, h3 { font-weight: 600; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    z-index: 100;
}
.nav-bar .site-title { font-weight: 600; color: var(--base01); }

/* Filters */

.filters { margin-bottom: 2rem; }

.search-form {
    display: flex;
    justify-content: center;
    margin-bottom: 1rem;
}

.search-form input[type=text] {
    width: 100%;
    max-width: 28rem;
    padding: 0.5rem 1rem;
    border: 1px solid var(--base1);
    border-radius: 8px;
    background: white;
    color: var(--fg);
    font-size: 1rem;
}
.search-form input[type=text]:focus { outline: 2px solid var(--brand); }

.tag-bar {
    display: flex;
    flex-wrap: wrap;
    justify-content: center;
    gap: 0.5rem;
}

.tag-button {
    border-radius: 999px;
    padding: 0.3rem 1rem;
    font-size: 0.85rem;
    background: var(--accent);
    color: var(--base01);
}
.tag-button:hover { background: var(--base1); color: white; }
.tag-button.active { background: var(--brand); color: white; }

/* Card grid */

.note-grid {
    display: flex;
    flex-wrap: wrap;
    justify-content: center;
    gap: 24px;
}

.note-card {
    position: relative;
    display: block;
    width: 250px;
    height: 250px;
    flex-shrink: 0;
    overflow: hidden;
    border-radius: 0.75rem;
    border: 1px solid rgba(255, 255, 255, 0.8);
    background: rgba(255, 255, 255, 0.6);
    box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06);
}
.note-card:hover { box-shadow: 0 10px 25px -5px rgba(0, 0, 0, 0.1); }

.note-cover {
    position: absolute;
    inset: 0;
    overflow: hidden;
}
.note-cover img { width: 100%; height: 100%; object-fit: contain; }

.note-overlay {
    position: absolute;
    left: 0;
    right: 0;
    bottom: 0;
    padding: 16px;
    background: linear-gradient(transparent, rgba(255, 255, 255, 0.8));
}

.note-title {
    font-size: 1rem;
    font-weight: 700;
    margin-bottom: 8px;
    color: #000;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

.note-summary {
    font-size: 0.8rem;
    color: var(--base01);
    margin-bottom: 6px;
}

.note-tags { display: flex; flex-wrap: wrap; gap: 4px; }

.note-tag {
    font-size: 0.7rem;
    color: #fff;
    background: rgba(0, 0, 0, 0.6);
    padding: 2px 8px;
    border-radius: 12px;
}

.empty-state, .loading-state {
    margin-top: 3rem;
    text-align: center;
    color: var(--muted);
}

.error-state {
    margin: 3rem auto 0;
    max-width: 32rem;
    padding: 1rem;
    border: 1px solid var(--red);
    border-radius: 4px;
    color: var(--red);
    text-align: center;
}

/* Article detail */

.article {
    max-width: 900px;
    margin: 0 auto;
}
.article h1 { font-size: 1.75rem; margin-bottom: 0.5rem; }
.article .meta { font-size: 0.85rem; color: var(--muted); margin-bottom: 1rem; }
.article .meta .tag-button { margin-right: 0.25rem; }
.article .article-cover { max-width: 100%; border-radius: 0.5rem; margin-bottom: 1rem; }

.article-content h2, .article-content h3 { margin: 1.5em 0 0.5em; }
.article-content p { margin: 0.75em 0; }
.article-content pre {
    background: var(--accent);
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
    margin: 1rem 0;
}
.article-content code {
    font-family: "SF Mono", "Consolas", "Liberation Mono", monospace;
    font-size: 0.9em;
}
.article-content blockquote {
    border-left: 3px solid var(--border);
    margin: 1rem 0;
    padding-left: 1rem;
    color: var(--muted);
}
.article-content ul, .article-content ol { padding-left: 1.5rem; }

.back-link { display: inline-block; margin-bottom: 1rem; font-size: 0.9rem; }
"#;
