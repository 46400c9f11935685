use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageRefError {
    #[error("image reference cannot be empty")]
    Empty,
}

/// Where a question image lives: a remote URL or a path relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    Remote(Url),
    Local(PathBuf),
}

/// An image reference exactly as authored, plus its parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    raw: String,
    location: ImageLocation,
}

impl ImageRef {
    /// Parse an authored image reference.
    ///
    /// Anything that parses as an `http`/`https`/`file` URL is remote; everything else
    /// is treated as a relative or absolute file path.
    ///
    /// # Errors
    ///
    /// Returns `ImageRefError::Empty` for blank references.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ImageRefError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(ImageRefError::Empty);
        }
        let location = match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => {
                ImageLocation::Remote(url)
            }
            _ => ImageLocation::Local(PathBuf::from(raw)),
        };
        Ok(Self {
            raw: raw.to_string(),
            location,
        })
    }

    /// The reference as written in the content file; also the image cache key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn location(&self) -> &ImageLocation {
        &self.location
    }

    pub fn as_url(&self) -> Option<&Url> {
        match &self.location {
            ImageLocation::Remote(url) => Some(url),
            ImageLocation::Local(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match &self.location {
            ImageLocation::Local(path) => Some(path.as_path()),
            ImageLocation::Remote(_) => None,
        }
    }
}
