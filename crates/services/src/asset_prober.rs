use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use futures::future::join_all;
use quiz_core::model::{ContentModel, ImageLocation, ImageRef};
use reqwest::Client;
use tracing::{info, warn};

pub const ASSET_ROOT_ENV: &str = "QUIZ_ASSET_ROOT";

/// Outcome of probing one image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Ok,
    Missing,
}

/// Probe results keyed by the reference as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageStatuses {
    entries: HashMap<String, ImageStatus>,
}

impl ImageStatuses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: &ImageRef, status: ImageStatus) {
        self.entries.insert(image.as_str().to_string(), status);
    }

    #[must_use]
    pub fn get(&self, image: &ImageRef) -> Option<ImageStatus> {
        self.entries.get(image.as_str()).copied()
    }

    /// Only images that were probed and found are rendered; everything else uses the fallback.
    #[must_use]
    pub fn is_ok(&self, image: &ImageRef) -> bool {
        self.get(image) == Some(ImageStatus::Ok)
    }

    #[must_use]
    pub fn found(&self) -> usize {
        self.count(ImageStatus::Ok)
    }

    #[must_use]
    pub fn missing(&self) -> usize {
        self.count(ImageStatus::Missing)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, status: ImageStatus) -> usize {
        self.entries.values().filter(|s| **s == status).count()
    }
}

/// Checks that question images can actually be shown.
///
/// Remote images are requested over HTTP; local ones are resolved against the asset root.
#[derive(Clone)]
pub struct AssetProber {
    client: Client,
    root: PathBuf,
    statuses: ImageStatuses,
}

impl AssetProber {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            root: root.into(),
            statuses: ImageStatuses::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn statuses(&self) -> &ImageStatuses {
        &self.statuses
    }

    #[must_use]
    pub fn into_statuses(self) -> ImageStatuses {
        self.statuses
    }

    /// Probe a single reference. Any failure counts as missing.
    pub async fn probe(&self, image: &ImageRef) -> ImageStatus {
        let present = match image.location() {
            ImageLocation::Remote(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => is_file(&path).await,
                Err(()) => false,
            },
            ImageLocation::Remote(url) => self
                .client
                .get(url.clone())
                .send()
                .await
                .is_ok_and(|res| res.status().is_success()),
            ImageLocation::Local(path) => is_file(&self.root.join(path)).await,
        };
        if present {
            ImageStatus::Ok
        } else {
            ImageStatus::Missing
        }
    }

    /// Probe every image referenced by `content` concurrently and keep the results.
    pub async fn preflight(&mut self, content: &ContentModel) -> &ImageStatuses {
        let mut seen = HashSet::new();
        let pending: Vec<&ImageRef> = content
            .image_refs()
            .filter(|image| self.statuses.get(image).is_none() && seen.insert(image.as_str()))
            .collect();
        let results = join_all(pending.iter().map(|image| self.probe(image))).await;

        for (image, status) in pending.into_iter().zip(results) {
            if status == ImageStatus::Missing {
                warn!(image = image.as_str(), "image missing, emoji fallback will be used");
            }
            self.statuses.insert(image, status);
        }
        if !self.statuses.is_empty() {
            info!(
                found = self.statuses.found(),
                missing = self.statuses.missing(),
                "image preflight complete"
            );
        }
        &self.statuses
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}
