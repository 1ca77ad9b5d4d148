//! Content index: where the article collection comes from.
//!
//! This module handles:
//! - Frontmatter parsing for markdown articles
//! - The `ContentIndex` sources (directory, JSON file, HTTP, in-memory)
//! - `IndexHandle`, which owns the loading/ready/failed state shared by handlers

use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::Article;

// ============================================================================
// Frontmatter Parsing
// ============================================================================

#[derive(Debug, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub date: Option<String>,
    pub hidden: bool,
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')))
    {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

/// Parse `tags: [a, b]` or `tags: a, b` into a list.
fn parse_inline_tags(value: &str) -> Vec<String> {
    let inner = value.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split(',')
        .map(unquote)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a markdown file into its frontmatter block and body.
/// Files without a closing `---` are treated as body only.
pub fn parse_frontmatter(content: &str) -> (Frontmatter, String) {
    let mut fm = Frontmatter::default();
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || lines[0].trim() != "---" {
        return (fm, content.to_string());
    }

    let end_idx = match lines.iter().skip(1).position(|l| l.trim() == "---") {
        Some(i) => i + 1,
        None => return (fm, content.to_string()),
    };

    let mut in_tags_block = false;

    for line in &lines[1..end_idx] {
        let trimmed = line.trim();

        if in_tags_block {
            if let Some(tag) = trimmed.strip_prefix("- ") {
                let tag = unquote(tag);
                if !tag.is_empty() {
                    fm.tags.push(tag.to_string());
                }
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }
            in_tags_block = false;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let value = unquote(value);
            match key.trim().to_lowercase().as_str() {
                "title" => fm.title = Some(value.to_string()),
                "slug" => fm.slug = Some(value.to_string()),
                "summary" | "description" => {
                    if !value.is_empty() {
                        fm.summary = Some(value.to_string());
                    }
                }
                "category" => fm.category = Some(value.to_string()),
                "tags" => {
                    if value.is_empty() {
                        in_tags_block = true;
                    } else {
                        fm.tags = parse_inline_tags(value);
                    }
                }
                "cover" | "image" => {
                    if !value.is_empty() {
                        fm.cover = Some(value.to_string());
                    }
                }
                "date" => {
                    if !value.is_empty() {
                        fm.date = Some(value.to_string());
                    }
                }
                "hidden" => fm.hidden = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
    }

    let body = lines[end_idx + 1..].join("\n");
    (fm, body)
}

// ============================================================================
// Article Loading
// ============================================================================

/// Build an article from one markdown file. The slug falls back to the file stem
/// and the title to the slug.
pub fn load_article(path: &Path) -> Result<Article> {
    let content = fs::read_to_string(path)?;
    let (fm, body) = parse_frontmatter(&content);

    let bad = |reason: String| Error::Frontmatter {
        path: path.display().to_string(),
        reason,
    };

    let slug = match fm.slug.filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| bad("cannot derive slug".to_string()))?,
    };

    let date = match fm.date {
        Some(ref raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| bad(format!("date '{}': {}", raw, e)))?,
        ),
        None => None,
    };

    Ok(Article {
        title: fm.title.filter(|t| !t.is_empty()).unwrap_or_else(|| slug.clone()),
        slug,
        summary: fm.summary,
        category: fm.category.unwrap_or_default(),
        tags: fm.tags,
        cover: fm.cover,
        date,
        body: Some(body),
        hidden: fm.hidden,
    })
}

/// Load every `.md` file under `dir`. Unparseable files are logged and skipped.
pub fn load_directory(dir: &Path) -> Result<Vec<Article>> {
    use rayon::prelude::*;

    if !dir.is_dir() {
        return Err(Error::IndexUnavailable(format!(
            "content directory {} does not exist",
            dir.display()
        )));
    }

    let paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "md").unwrap_or(false))
        .map(|e| e.path().to_path_buf())
        .collect();

    let articles: Vec<Article> = paths
        .par_iter()
        .filter_map(|path| match load_article(path) {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping article");
                None
            }
        })
        .collect();

    Ok(articles)
}

/// Drop hidden articles and order newest first; undated articles go last.
pub fn prepare_collection(mut articles: Vec<Article>) -> Vec<Article> {
    articles.retain(|a| !a.hidden);
    articles.sort_by_key(|a| Reverse(a.date));
    articles
}

// ============================================================================
// Index Sources
// ============================================================================

#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// The full, unfiltered article collection.
    async fn load_articles(&self) -> Result<Vec<Article>>;

    fn describe(&self) -> String;
}

pub struct DirectoryIndex {
    pub dir: PathBuf,
}

#[async_trait]
impl ContentIndex for DirectoryIndex {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || load_directory(&dir))
            .await
            .map_err(|e| Error::IndexUnavailable(format!("loader task failed: {}", e)))?
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

pub struct JsonIndex {
    pub path: PathBuf,
}

#[async_trait]
impl ContentIndex for JsonIndex {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

pub struct HttpIndex {
    pub url: url::Url,
    client: reqwest::Client,
}

/// Requests to the index URL give up after this long.
pub const HTTP_INDEX_TIMEOUT: Duration = Duration::from_secs(10);

impl HttpIndex {
    pub fn new(url: url::Url) -> Result<Self> {
        Self::with_timeout(url, HTTP_INDEX_TIMEOUT)
    }

    pub fn with_timeout(url: url::Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl ContentIndex for HttpIndex {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        let articles = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Article>>()
            .await?;
        Ok(articles)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// A fixed in-memory collection.
pub struct StaticIndex {
    pub articles: Vec<Article>,
}

#[async_trait]
impl ContentIndex for StaticIndex {
    async fn load_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }

    fn describe(&self) -> String {
        format!("{} static articles", self.articles.len())
    }
}

// ============================================================================
// Index State
// ============================================================================

#[derive(Debug, Clone)]
pub enum IndexState {
    Loading,
    Ready(Arc<Vec<Article>>),
    Failed(String),
}

impl IndexState {
    pub fn is_loading(&self) -> bool {
        matches!(self, IndexState::Loading)
    }

    /// Loaded articles; empty while loading or after a failure.
    pub fn items(&self) -> &[Article] {
        match self {
            IndexState::Ready(items) => items.as_slice(),
            _ => &[],
        }
    }
}

/// Shared handle to the index state. The load task is the only writer.
#[derive(Clone)]
pub struct IndexHandle {
    source: Arc<dyn ContentIndex>,
    state: Arc<RwLock<IndexState>>,
    reload_lock: Arc<Mutex<()>>,
}

impl IndexHandle {
    pub fn new(source: Arc<dyn ContentIndex>) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(IndexState::Loading)),
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> IndexState {
        self.state.read().await.clone()
    }

    /// Load the collection and publish the result. Concurrent reloads run one at a time.
    pub async fn reload(&self) {
        let _guard = self.reload_lock.lock().await;
        self.load_and_publish().await;
    }

    /// Start a background reload unless one is already running.
    pub fn try_spawn_reload(&self) -> Option<tokio::task::JoinHandle<()>> {
        let guard = self.reload_lock.clone().try_lock_owned().ok()?;
        let handle = self.clone();
        Some(tokio::spawn(async move {
            let _guard = guard;
            handle.load_and_publish().await
        }))
    }

    async fn load_and_publish(&self) {
        *self.state.write().await = IndexState::Loading;

        let next = match self.source.load_articles().await {
            Ok(articles) => {
                let articles = prepare_collection(articles);
                tracing::info!(
                    source = %self.source.describe(),
                    count = articles.len(),
                    "content index loaded"
                );
                IndexState::Ready(Arc::new(articles))
            }
            Err(e) => {
                tracing::error!(source = %self.source.describe(), error = %e, "content index failed");
                IndexState::Failed(e.to_string())
            }
        };

        *self.state.write().await = next;
    }

    pub fn spawn_reload(&self) -> tokio::task::JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move { handle.reload().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOTES_CATEGORY;

    const SAMPLE: &str = "---\n\
title: \"Rust Ownership\"\n\
slug: rust-ownership\n\
summary: Moves and borrows\n\
category: Notes\n\
tags: [rust, \"memory\"]\n\
cover: /covers/rust.png\n\
date: 2024-03-01\n\
---\n\
# Body\n\
text";

    #[test]
    fn test_parse_frontmatter_inline() {
        let (fm, body) = parse_frontmatter(SAMPLE);
        assert_eq!(fm.title.as_deref(), Some("Rust Ownership"));
        assert_eq!(fm.slug.as_deref(), Some("rust-ownership"));
        assert_eq!(fm.summary.as_deref(), Some("Moves and borrows"));
        assert_eq!(fm.category.as_deref(), Some("Notes"));
        assert_eq!(fm.tags, ["rust", "memory"]);
        assert_eq!(fm.cover.as_deref(), Some("/covers/rust.png"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-01"));
        assert_eq!(body, "# Body\ntext");
    }

    #[test]
    fn test_parse_frontmatter_tag_list() {
        let content = "---\ntitle: T\ntags:\n  - go\n  - 'channels'\ncategory: Notes\n---\nbody";
        let (fm, _) = parse_frontmatter(content);
        assert_eq!(fm.tags, ["go", "channels"]);
        assert_eq!(fm.category.as_deref(), Some("Notes"));

        let (fm, _) = parse_frontmatter("---\ntags: a, b,\n---\n");
        assert_eq!(fm.tags, ["a", "b"]);
    }

    #[test]
    fn test_parse_frontmatter_unterminated_tag_list() {
        let (fm, _) = parse_frontmatter("---\ntags: [a, b\n---\n");
        assert_eq!(fm.tags, ["a", "b"]);

        let (fm, _) = parse_frontmatter("---\ntags: a, b]\n---\n");
        assert_eq!(fm.tags, ["a", "b"]);
    }

    #[test]
    fn test_parse_frontmatter_missing_block() {
        let (fm, body) = parse_frontmatter("just text");
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "just text");

        let (_, body) = parse_frontmatter("---\ntitle: unterminated");
        assert_eq!(body, "---\ntitle: unterminated");
    }

    #[test]
    fn test_load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), SAMPLE).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested").join("plain-note.md"),
            "---\ncategory: Notes\n---\nhello",
        )
        .unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: Bad\ndate: yesterday\n---\n").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not markdown").unwrap();

        let mut articles = load_directory(dir.path()).unwrap();
        articles.sort_by(|a, b| a.slug.cmp(&b.slug));

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug, "plain-note");
        assert_eq!(articles[0].title, "plain-note");
        assert_eq!(articles[0].body.as_deref(), Some("hello"));
        assert_eq!(articles[1].slug, "rust-ownership");
        assert_eq!(articles[1].date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_load_article_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.md");
        fs::write(&path, "---\ndate: 03/01/2024\n---\n").unwrap();
        assert!(matches!(load_article(&path), Err(Error::Frontmatter { .. })));
    }

    #[test]
    fn test_prepare_collection() {
        let mut dated = Article::new("new", "New", NOTES_CATEGORY);
        dated.date = NaiveDate::from_ymd_opt(2024, 5, 1);
        let mut older = Article::new("old", "Old", NOTES_CATEGORY);
        older.date = NaiveDate::from_ymd_opt(2023, 1, 1);
        let mut hidden = Article::new("hidden", "Hidden", NOTES_CATEGORY);
        hidden.hidden = true;
        let undated = Article::new("undated", "Undated", NOTES_CATEGORY);

        let prepared = prepare_collection(vec![undated, older, hidden, dated]);
        let slugs: Vec<_> = prepared.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["new", "old", "undated"]);
    }

    #[tokio::test]
    async fn test_handle_state_transitions() {
        let handle = IndexHandle::new(Arc::new(StaticIndex {
            articles: vec![Article::new("a", "A", NOTES_CATEGORY)],
        }));
        assert!(handle.snapshot().await.is_loading());
        assert!(handle.snapshot().await.items().is_empty());

        handle.reload().await;
        let state = handle.snapshot().await;
        assert!(!state.is_loading());
        assert_eq!(state.items().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_failed_load() {
        let handle = IndexHandle::new(Arc::new(DirectoryIndex {
            dir: PathBuf::from("/definitely/not/here"),
        }));
        handle.spawn_reload().await.unwrap();
        match handle.snapshot().await {
            IndexState::Failed(reason) => assert!(reason.contains("does not exist")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_json_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"[{"slug":"a","title":"A","category":"Notes","tags":["x"]},
                {"slug":"b","title":"B","category":"Food"}]"#,
        )
        .unwrap();

        let articles = JsonIndex { path }.load_articles().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].tags, ["x"]);
        assert!(articles[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_json_index_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonIndex { path }.load_articles().await,
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_http_index() {
        use axum::{routing::get, Json, Router};

        let app = Router::new().route(
            "/blogs/index.json",
            get(|| async {
                Json(vec![Article::new("remote", "Remote Note", NOTES_CATEGORY).with_tags(["net"])])
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let url = url::Url::parse(&format!("http://{}/blogs/index.json", addr)).unwrap();
        let articles = HttpIndex::new(url).unwrap().load_articles().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].slug, "remote");
        assert_eq!(articles[0].tags, ["net"]);

        let missing = url::Url::parse(&format!("http://{}/nope.json", addr)).unwrap();
        assert!(matches!(
            HttpIndex::new(missing).unwrap().load_articles().await,
            Err(Error::Http(_))
        ));
    }

    /// Accepts connections and holds them open without ever answering.
    async fn silent_listener() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_http_index_times_out() {
        let addr = silent_listener().await;
        let url = url::Url::parse(&format!("http://{}/index.json", addr)).unwrap();
        let index = HttpIndex::with_timeout(url, Duration::from_millis(200)).unwrap();
        let handle = IndexHandle::new(Arc::new(index));

        tokio::time::timeout(Duration::from_secs(5), handle.reload())
            .await
            .expect("reload should finish once the request times out");
        assert!(matches!(handle.snapshot().await, IndexState::Failed(_)));

        // A later reload is not stuck behind the first one
        tokio::time::timeout(Duration::from_secs(5), handle.reload())
            .await
            .expect("second reload should finish too");
        assert!(matches!(handle.snapshot().await, IndexState::Failed(_)));
    }

    #[tokio::test]
    async fn test_try_spawn_reload_skips_when_running() {
        let addr = silent_listener().await;
        let url = url::Url::parse(&format!("http://{}/index.json", addr)).unwrap();
        let index = HttpIndex::with_timeout(url, Duration::from_millis(300)).unwrap();
        let handle = IndexHandle::new(Arc::new(index));

        let first = handle.try_spawn_reload().expect("nothing running yet");
        assert!(handle.try_spawn_reload().is_none());

        first.await.unwrap();
        assert!(matches!(handle.snapshot().await, IndexState::Failed(_)));
        let again = handle.try_spawn_reload().expect("previous reload finished");
        again.await.unwrap();
    }
}
