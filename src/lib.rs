//! Notes gallery library - re-exports for testing and external use.
//!
//! The application is organized into the following modules:
//!
//! - `models`: Article records, query state, and the derived view
//! - `filter`: Category, search, and tag filtering plus text truncation
//! - `index`: Content index sources and the shared loading state
//! - `config`: Environment and site configuration
//! - `templates`: HTML/CSS rendering
//! - `handlers`: HTTP route handlers
//! - `error`: Error type and HTTP mapping

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod index;
pub mod models;
pub mod templates;

use config::{Config, IndexSource, SiteConfig};
use index::{ContentIndex, DirectoryIndex, HttpIndex, IndexHandle, JsonIndex};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub site: SiteConfig,
    pub index: IndexHandle,
    pub covers_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(site: SiteConfig, source: Arc<dyn ContentIndex>) -> Self {
        Self {
            site,
            index: IndexHandle::new(source),
            covers_dir: None,
        }
    }

    /// Build state from configuration. The index starts out loading; call
    /// `index.spawn_reload()` to populate it.
    pub fn from_config(config: &Config) -> error::Result<Self> {
        let site = config.load_site_config()?;
        let source: Arc<dyn ContentIndex> = match config.source {
            IndexSource::Directory(ref dir) => Arc::new(DirectoryIndex { dir: dir.clone() }),
            IndexSource::JsonFile(ref path) => Arc::new(JsonIndex { path: path.clone() }),
            IndexSource::Url(ref url) => Arc::new(HttpIndex::new(url.clone())?),
        };

        Ok(Self {
            covers_dir: config.covers_dir.clone(),
            ..Self::new(site, source)
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/notes", get(handlers::notes_page))
        .route("/blog/{slug}", get(handlers::article_page))
        .route("/api/notes", get(handlers::api_notes))
        .route("/api/reload", post(handlers::api_reload));

    if let Some(ref dir) = state.covers_dir {
        app = app.nest_service("/covers", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

// Re-export commonly used types
pub use error::{Error, Result};

pub use models::{Article, NotesParams, NotesQuery, NotesView, TagFilter, ALL_TAGS, NOTES_CATEGORY};

pub use filter::{
    all_tags, derive_view, filtered_articles, matches_search, matches_tag, notes_articles,
    truncate_text,
};

pub use index::{parse_frontmatter, IndexState, StaticIndex};
