//! Notes gallery - a browsable grid of the site's notes.
//!
//! This is the main entry point for the gallery web server. See the library
//! crate for the module layout.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_gallery::{config::Config, router, AppState};

// ============================================================================
// Logging
// ============================================================================

/// `RUST_LOG` filters output; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notes_gallery=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let state = Arc::new(AppState::from_config(&config)?);
    state.index.spawn_reload();

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!(addr = %config.bind_addr, source = ?config.source, "notes gallery listening");

    axum::serve(listener, app).await?;
    Ok(())
}
