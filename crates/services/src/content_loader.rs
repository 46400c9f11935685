use std::env;
use std::path::PathBuf;

use quiz_core::model::ContentModel;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::error::ContentLoadError;

pub const CONTENT_ENV: &str = "QUIZ_CONTENT_URL";
pub const DEFAULT_CONTENT_PATH: &str = "./content/questions.json";

/// Question data compiled into the binary, used when the primary source is unreachable.
pub const EMBEDDED_CONTENT: &str = include_str!("../content/questions.json");

/// Where the primary copy of the question data lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
    Remote(Url),
    File(PathBuf),
}

impl ContentSource {
    /// `http(s)://` becomes a remote source, `file://` and anything else a local path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_or_else(|()| Self::File(PathBuf::from(raw)), Self::File),
            _ => Self::File(PathBuf::from(raw)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContentConfig {
    pub source: ContentSource,
    pub fallback: Option<String>,
}

impl ContentConfig {
    /// Primary source from `QUIZ_CONTENT_URL` (or the default path), embedded fallback.
    #[must_use]
    pub fn from_env() -> Self {
        let raw = env::var(CONTENT_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_PATH.into());
        Self::new(ContentSource::parse(&raw))
    }

    #[must_use]
    pub fn new(source: ContentSource) -> Self {
        Self {
            source,
            fallback: Some(EMBEDDED_CONTENT.to_string()),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Loads the content model once at startup.
#[derive(Clone)]
pub struct ContentLoader {
    client: Client,
    config: ContentConfig,
}

impl ContentLoader {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ContentConfig::from_env())
    }

    #[must_use]
    pub fn new(config: ContentConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Load from the primary source, falling back to the embedded copy.
    ///
    /// # Errors
    ///
    /// Returns `ContentLoadError` when neither the primary source nor the fallback
    /// yields valid content.
    pub async fn load(&self) -> Result<ContentModel, ContentLoadError> {
        let content = match self.load_primary().await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, source = ?self.config.source, "content fetch failed; using fallback");
                self.load_fallback()?
            }
        };
        log_track_counts(&content);
        Ok(content)
    }

    /// Load from the primary source only.
    ///
    /// # Errors
    ///
    /// Returns `ContentLoadError` on transport failures, non-success status, or
    /// malformed content.
    pub async fn load_primary(&self) -> Result<ContentModel, ContentLoadError> {
        let raw = match &self.config.source {
            ContentSource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(ContentLoadError::HttpStatus(response.status()));
                }
                response.text().await?
            }
            ContentSource::File(path) => tokio::fs::read_to_string(path).await?,
        };
        Ok(ContentModel::from_json(&raw)?)
    }

    fn load_fallback(&self) -> Result<ContentModel, ContentLoadError> {
        let raw = self
            .config
            .fallback
            .as_deref()
            .ok_or(ContentLoadError::NoFallback)?;
        ContentModel::from_json(raw).map_err(|err| {
            warn!(error = %err, "fallback content parse failed");
            ContentLoadError::Content(err)
        })
    }
}

fn log_track_counts(content: &ContentModel) {
    for track in content.tracks() {
        info!(track = %track.id(), label = track.label(), questions = track.len(), "track loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = ContentModel::from_json(EMBEDDED_CONTENT).unwrap();
        let ids: Vec<&str> = content.tracks().iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["y2_3", "y4_6"]);
        assert_eq!(content.meta().flight_prefix(), "EIS-ES");
    }

    #[test]
    fn source_parsing_distinguishes_remote_and_local() {
        assert!(matches!(
            ContentSource::parse("https://example.com/q.json"),
            ContentSource::Remote(_)
        ));
        assert_eq!(
            ContentSource::parse("./content/questions.json"),
            ContentSource::File(PathBuf::from("./content/questions.json"))
        );
        assert_eq!(
            ContentSource::parse("file:///tmp/q.json"),
            ContentSource::File(PathBuf::from("/tmp/q.json"))
        );
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_embedded() {
        let loader = ContentLoader::new(ContentConfig::new(ContentSource::File(
            "/definitely/not/here.json".into(),
        )));
        let content = loader.load().await.unwrap();
        assert_eq!(content.tracks().len(), 2);
    }

    #[tokio::test]
    async fn no_fallback_is_an_error() {
        let loader = ContentLoader::new(
            ContentConfig::new(ContentSource::File("/definitely/not/here.json".into()))
                .with_fallback(None),
        );
        assert!(matches!(
            loader.load().await,
            Err(ContentLoadError::NoFallback)
        ));
    }

    #[tokio::test]
    async fn malformed_fallback_is_an_error() {
        let loader = ContentLoader::new(
            ContentConfig::new(ContentSource::File("/definitely/not/here.json".into()))
                .with_fallback(Some("{\"modes\":".into())),
        );
        assert!(matches!(
            loader.load().await,
            Err(ContentLoadError::Content(_))
        ));
    }
}
