//! HTTP route handlers for the notes gallery.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ApiError, Error, Result};
use crate::filter::derive_view;
use crate::index::IndexState;
use crate::models::{NotesParams, NotesQuery, NotesView};
use crate::templates::{render_article, render_gallery, GalleryBody};
use crate::AppState;

// ============================================================================
// Index Handler
// ============================================================================

pub async fn index() -> Redirect {
    Redirect::to("/notes")
}

// ============================================================================
// Notes Gallery Handler
// ============================================================================

pub async fn notes_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotesParams>,
) -> Response {
    let query = NotesQuery::from(params);

    match state.index.snapshot().await {
        IndexState::Loading => {
            Html(render_gallery(&state.site, &query, GalleryBody::Loading)).into_response()
        }
        IndexState::Failed(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(render_gallery(&state.site, &query, GalleryBody::Failed(&reason))),
        )
            .into_response(),
        IndexState::Ready(articles) => {
            let view = derive_view(&articles, &query);
            Html(render_gallery(&state.site, &query, GalleryBody::Ready(&view))).into_response()
        }
    }
}

// ============================================================================
// Article Handler
// ============================================================================

pub async fn article_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>> {
    let articles = match state.index.snapshot().await {
        IndexState::Ready(articles) => articles,
        IndexState::Loading => {
            return Err(Error::IndexUnavailable("content index is still loading".into()))
        }
        IndexState::Failed(reason) => return Err(Error::IndexUnavailable(reason)),
    };

    let article = articles
        .iter()
        .find(|a| a.slug == slug)
        .ok_or_else(|| Error::NotFound(format!("article '{}'", slug)))?;

    Ok(Html(render_article(article, &state.site)))
}

// ============================================================================
// JSON API
// ============================================================================

#[derive(Serialize)]
pub struct NotesResponse {
    pub loading: bool,
    #[serde(flatten)]
    pub view: NotesView,
}

pub async fn api_notes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotesParams>,
) -> std::result::Result<Json<NotesResponse>, ApiError> {
    let query = NotesQuery::from(params);

    let response = match state.index.snapshot().await {
        IndexState::Loading => NotesResponse {
            loading: true,
            view: NotesView::default(),
        },
        IndexState::Failed(reason) => return Err(Error::IndexUnavailable(reason).into()),
        IndexState::Ready(articles) => NotesResponse {
            loading: false,
            view: derive_view(&articles, &query),
        },
    };

    Ok(Json(response))
}

pub async fn api_reload(State(state): State<Arc<AppState>>) -> StatusCode {
    tracing::info!("content index reload requested");
    if state.index.try_spawn_reload().is_none() {
        tracing::debug!("reload already running, not starting another");
    }
    StatusCode::ACCEPTED
}
