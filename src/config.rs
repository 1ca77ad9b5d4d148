//! Runtime configuration.
//!
//! `Config` comes from the environment (optionally seeded from a `.env` file).
//! `SiteConfig` holds site-wide display values and is injected into the
//! application state; nothing reads it from a global.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CONTENT_DIR: &str = "content";

// ============================================================================
// Content Source
// ============================================================================

/// Where the article collection is loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexSource {
    Directory(PathBuf),
    JsonFile(PathBuf),
    Url(url::Url),
}

// ============================================================================
// Server Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub source: IndexSource,
    pub covers_dir: Option<PathBuf>,
    pub site_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("NOTES_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| Error::Config(format!("NOTES_BIND_ADDR '{}': {}", bind_raw, e)))?;

        // URL beats a local index file, which beats scanning a directory
        let source = if let Some(raw) = get("NOTES_INDEX_URL") {
            IndexSource::Url(parse_index_url(&raw)?)
        } else if let Some(file) = get("NOTES_INDEX_FILE") {
            IndexSource::JsonFile(PathBuf::from(file))
        } else {
            IndexSource::Directory(PathBuf::from(
                get("NOTES_CONTENT_DIR").unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_string()),
            ))
        };

        Ok(Self {
            bind_addr,
            source,
            covers_dir: get("NOTES_COVERS_DIR").map(PathBuf::from),
            site_config_path: get("NOTES_SITE_CONFIG").map(PathBuf::from),
        })
    }

    pub fn load_site_config(&self) -> Result<SiteConfig> {
        match self.site_config_path {
            Some(ref path) => SiteConfig::from_file(path),
            None => Ok(SiteConfig::default()),
        }
    }
}

pub fn parse_index_url(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
}

// ============================================================================
// Site Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub search_placeholder: String,
    pub all_label: String,
    pub empty_message: String,
    pub loading_message: String,
    /// Card summaries are cut to this many characters
    pub summary_max_chars: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Notes".to_string(),
            search_placeholder: "Search notes...".to_string(),
            all_label: "All".to_string(),
            empty_message: "no notes found".to_string(),
            loading_message: "Loading notes...".to_string(),
            summary_max_chars: 80,
        }
    }
}

impl SiteConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read site config {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.source, IndexSource::Directory(PathBuf::from("content")));
        assert!(config.covers_dir.is_none());
    }

    #[test]
    fn test_source_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("NOTES_CONTENT_DIR", "posts"),
            ("NOTES_INDEX_FILE", "index.json"),
        ]))
        .unwrap();
        assert_eq!(config.source, IndexSource::JsonFile(PathBuf::from("index.json")));

        let config = Config::from_lookup(lookup(&[
            ("NOTES_INDEX_FILE", "index.json"),
            ("NOTES_INDEX_URL", "https://example.com/blogs/index.json"),
        ]))
        .unwrap();
        assert!(matches!(config.source, IndexSource::Url(_)));

        let config = Config::from_lookup(lookup(&[("NOTES_INDEX_URL", "  ")])).unwrap();
        assert!(matches!(config.source, IndexSource::Directory(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("NOTES_BIND_ADDR", "nope")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("NOTES_INDEX_URL", "ftp://example.com/x")])),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_site_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{"title": "Field Notes", "summary_max_chars": 40}"#).unwrap();

        let site = SiteConfig::from_file(&path).unwrap();
        assert_eq!(site.title, "Field Notes");
        assert_eq!(site.summary_max_chars, 40);
        assert_eq!(site.empty_message, "no notes found");
    }
}
